mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::domain::{Candidate, CandidateId};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read candidate catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid candidate CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid candidate JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("candidate id `{0}` appears more than once")]
    DuplicateId(CandidateId),
    #[error("candidate `{id}` has match score {score}; expected 0-100")]
    MatchScoreOutOfRange { id: CandidateId, score: u8 },
    #[error("unsupported catalog format `{0}`; expected .csv or .json")]
    UnsupportedFormat(String),
}

/// Immutable candidate set supplied once per session.
#[derive(Debug, Clone)]
pub struct CandidateCatalog {
    candidates: Vec<Candidate>,
}

impl CandidateCatalog {
    /// Validates ids are unique and scores are within 0-100.
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for candidate in &candidates {
            if candidate.match_score > 100 {
                return Err(CatalogError::MatchScoreOutOfRange {
                    id: candidate.id.clone(),
                    score: candidate.match_score,
                });
            }
            if !seen.insert(&candidate.id) {
                return Err(CatalogError::DuplicateId(candidate.id.clone()));
            }
        }

        Ok(Self { candidates })
    }

    pub fn standard() -> Self {
        Self {
            candidates: standard_candidates(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let file = std::fs::File::open(path)?;

        let catalog = match extension.as_str() {
            "csv" => Self::from_csv_reader(file)?,
            "json" => Self::from_json_reader(file)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        info!(path = %path.display(), candidates = catalog.len(), "candidate catalog loaded");
        Ok(catalog)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(parser::parse_csv(reader)?)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(parser::parse_json(reader)?)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn standard_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: CandidateId::new("niti-data-analyst"),
            title: "Data Analyst".to_string(),
            company: "Niti Aayog".to_string(),
            company_initials: "NA".to_string(),
            location: "New Delhi".to_string(),
            mode: "Hybrid".to_string(),
            duration: "6 months".to_string(),
            stipend: "₹15,000/month".to_string(),
            match_score: 95,
            description: "Analyse programme datasets and prepare dashboards that feed policy briefs for state development indicators.".to_string(),
            skills: strings(&["Python", "Data Analysis", "Excel"]),
            requirements: strings(&[
                "Pursuing or completed an undergraduate degree",
                "Comfort with spreadsheets and basic statistics",
                "Available for at least 6 months",
            ]),
            verified: true,
        },
        Candidate {
            id: CandidateId::new("isro-web-developer"),
            title: "Web Developer".to_string(),
            company: "ISRO".to_string(),
            company_initials: "IS".to_string(),
            location: "Bengaluru".to_string(),
            mode: "On-site".to_string(),
            duration: "6 months".to_string(),
            stipend: "₹20,000/month".to_string(),
            match_score: 91,
            description: "Build internal dashboards for mission telemetry review using modern web tooling.".to_string(),
            skills: strings(&["JavaScript", "React", "Communication"]),
            requirements: strings(&[
                "Portfolio of at least one web project",
                "Familiarity with REST APIs",
            ]),
            verified: true,
        },
        Candidate {
            id: CandidateId::new("digital-india-content"),
            title: "Content Writer".to_string(),
            company: "Digital India".to_string(),
            company_initials: "DI".to_string(),
            location: "Remote".to_string(),
            mode: "Remote".to_string(),
            duration: "3-4 months".to_string(),
            stipend: "₹8,000/month".to_string(),
            match_score: 84,
            description: "Write citizen-facing explainers for digital public services in plain language.".to_string(),
            skills: strings(&["Content Writing", "Communication"]),
            requirements: strings(&["Strong written English or Hindi"]),
            verified: true,
        },
        Candidate {
            id: CandidateId::new("aiims-health-research"),
            title: "Health Research Intern".to_string(),
            company: "AIIMS Delhi".to_string(),
            company_initials: "AD".to_string(),
            location: "Delhi NCR".to_string(),
            mode: "On-site".to_string(),
            duration: "6 months".to_string(),
            stipend: "₹12,000/month".to_string(),
            match_score: 88,
            description: "Assist clinical researchers with literature reviews and patient survey data entry.".to_string(),
            skills: strings(&["Data Analysis", "Excel"]),
            requirements: strings(&[
                "Background in life sciences preferred",
                "Attention to detail",
            ]),
            verified: true,
        },
        Candidate {
            id: CandidateId::new("nabard-agri-finance"),
            title: "Agri Finance Associate".to_string(),
            company: "NABARD".to_string(),
            company_initials: "NB".to_string(),
            location: "Mumbai".to_string(),
            mode: "Hybrid".to_string(),
            duration: "2-4 months".to_string(),
            stipend: "₹10,000/month".to_string(),
            match_score: 79,
            description: "Support rural credit programme monitoring and farmer producer organisation reporting.".to_string(),
            skills: strings(&["Excel", "Communication"]),
            requirements: strings(&["Interest in rural finance"]),
            verified: false,
        },
        Candidate {
            id: CandidateId::new("mygov-social-media"),
            title: "Social Media Intern".to_string(),
            company: "MyGov".to_string(),
            company_initials: "MG".to_string(),
            location: "New Delhi".to_string(),
            mode: "Remote".to_string(),
            duration: "3-4 months".to_string(),
            stipend: "Unpaid".to_string(),
            match_score: 73,
            description: "Plan and schedule campaign posts and track engagement across public channels.".to_string(),
            skills: strings(&["Digital Marketing", "Graphic Design", "Content Writing"]),
            requirements: strings(&["Active social media presence"]),
            verified: true,
        },
    ]
}
