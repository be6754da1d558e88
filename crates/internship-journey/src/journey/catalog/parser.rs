use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::journey::domain::{Candidate, CandidateId};

/// Separator used inside the list-valued CSV columns.
const LIST_SEPARATOR: char = ';';

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Candidate>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut candidates = Vec::new();

    for record in csv_reader.deserialize::<CandidateRow>() {
        candidates.push(record?.into_candidate());
    }

    Ok(candidates)
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<Candidate>, serde_json::Error> {
    serde_json::from_reader(reader)
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    id: String,
    title: String,
    company: String,
    #[serde(default)]
    company_initials: String,
    location: String,
    mode: String,
    duration: String,
    #[serde(default)]
    stipend: String,
    match_score: u8,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "separated_list")]
    skills: Vec<String>,
    #[serde(default, deserialize_with = "separated_list")]
    requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    verified: bool,
}

impl CandidateRow {
    fn into_candidate(self) -> Candidate {
        let company_initials = if self.company_initials.is_empty() {
            initials(&self.company)
        } else {
            self.company_initials
        };

        Candidate {
            id: CandidateId(self.id),
            title: self.title,
            company: self.company,
            company_initials,
            location: self.location,
            mode: self.mode,
            duration: self.duration,
            stipend: self.stipend,
            match_score: self.match_score,
            description: self.description,
            skills: self.skills,
            requirements: self.requirements,
            verified: self.verified,
        }
    }
}

fn initials(company: &str) -> String {
    company
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

fn separated_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect())
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn csv_rows_split_list_columns_and_derive_initials() {
        let csv = "id,title,company,company_initials,location,mode,duration,stipend,match_score,description,skills,requirements,verified\n\
                   niti-data,Data Analyst,Niti Aayog,,New Delhi,Hybrid,6 months,\"₹15,000/month\",92,Policy data work,Python; Excel ;,Graduate,yes\n";

        let candidates = parse_csv(Cursor::new(csv)).expect("csv parses");

        assert_eq!(candidates.len(), 1);
        let candidate = &candidates[0];
        assert_eq!(candidate.company_initials, "NA");
        assert_eq!(candidate.skills, ["Python", "Excel"]);
        assert_eq!(candidate.requirements, ["Graduate"]);
        assert_eq!(candidate.stipend, "₹15,000/month");
        assert!(candidate.verified);
    }
}
