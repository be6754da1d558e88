use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of sectors a profile may carry.
pub const MAX_SECTORS: usize = 3;

/// Identifier wrapper for catalog candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finalized profile produced by the onboarding wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    pub education: String,
    pub skills: BTreeSet<String>,
    pub sectors: BTreeSet<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserProfile {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }
}

/// Internship listing as supplied by the catalog collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub title: String,
    pub company: String,
    pub company_initials: String,
    pub location: String,
    pub mode: String,
    pub duration: String,
    pub stipend: String,
    pub match_score: u8,
    pub description: String,
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
    pub verified: bool,
}

/// Opaque handle to an uploaded resume; the core never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeRef(pub String);

/// File reference handed over by the file picker collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub name: String,
    pub declared_type: String,
    pub handle: ResumeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    #[default]
    #[serde(rename = "Immediately")]
    Immediately,
    #[serde(rename = "Within 1 week")]
    WithinOneWeek,
    #[serde(rename = "Within 2 weeks")]
    WithinTwoWeeks,
    #[serde(rename = "Within 1 month")]
    WithinOneMonth,
}

impl Availability {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Immediately,
            Self::WithinOneWeek,
            Self::WithinTwoWeeks,
            Self::WithinOneMonth,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediately => "Immediately",
            Self::WithinOneWeek => "Within 1 week",
            Self::WithinTwoWeeks => "Within 2 weeks",
            Self::WithinOneMonth => "Within 1 month",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkHours {
    #[serde(rename = "20 hours/week")]
    Twenty,
    #[serde(rename = "30 hours/week")]
    Thirty,
    #[default]
    #[serde(rename = "40 hours/week")]
    Forty,
}

impl WorkHours {
    pub const fn ordered() -> [Self; 3] {
        [Self::Twenty, Self::Thirty, Self::Forty]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Twenty => "20 hours/week",
            Self::Thirty => "30 hours/week",
            Self::Forty => "40 hours/week",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkMode {
    Remote,
    #[default]
    Hybrid,
    #[serde(rename = "On-site")]
    OnSite,
}

impl WorkMode {
    pub const fn ordered() -> [Self; 3] {
        [Self::Remote, Self::Hybrid, Self::OnSite]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| option.label().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
        }
    }
}

/// Finalized, stamped application produced by the application wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub application_id: ApplicationId,
    pub internship_id: CandidateId,
    pub internship_title: String,
    pub company: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub has_resume: bool,
    pub resume_ref: ResumeRef,
    pub resume_name: String,
    pub cover_letter: String,
    pub availability: Availability,
    pub work_hours: WorkHours,
    pub work_mode: WorkMode,
    pub submitted_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}
