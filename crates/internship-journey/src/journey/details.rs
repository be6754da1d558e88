use serde::Serialize;

use super::domain::{Candidate, UserProfile};

/// Skills the details screen flags as worth building when the applicant lacks them.
pub const DEVELOPABLE_SKILLS: [&str; 4] = ["Python", "JavaScript", "React", "Data Analysis"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillMatch {
    Have,
    Develop,
    Optional,
}

impl SkillMatch {
    pub fn classify(skill: &str, profile: Option<&UserProfile>) -> Self {
        if profile.is_some_and(|profile| profile.has_skill(skill)) {
            Self::Have
        } else if DEVELOPABLE_SKILLS.contains(&skill) {
            Self::Develop
        } else {
            Self::Optional
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Have => "You have",
            Self::Develop => "Skills to develop",
            Self::Optional => "Optional skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillBadge {
    pub skill: String,
    pub matched: SkillMatch,
}

/// Read model for the details screen.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateDetails<'a> {
    pub candidate: &'a Candidate,
    pub skills: Vec<SkillBadge>,
    pub saved: bool,
}

impl<'a> CandidateDetails<'a> {
    pub fn new(candidate: &'a Candidate, profile: Option<&UserProfile>, saved: bool) -> Self {
        let skills = candidate
            .skills
            .iter()
            .map(|skill| SkillBadge {
                skill: skill.clone(),
                matched: SkillMatch::classify(skill, profile),
            })
            .collect();

        Self {
            candidate,
            skills,
            saved,
        }
    }

    pub fn count(&self, matched: SkillMatch) -> usize {
        self.skills
            .iter()
            .filter(|badge| badge.matched == matched)
            .count()
    }
}
