//! Onboarding wizard that accumulates a [`UserProfile`] across five conversational steps.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::domain::{UserProfile, MAX_SECTORS};
use super::error::ValidationError;
use super::options::OptionLists;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Education,
    Skills,
    Sectors,
    Location,
    Confirmation,
}

impl OnboardingStep {
    pub const TOTAL: u8 = 5;

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Education,
            Self::Skills,
            Self::Sectors,
            Self::Location,
            Self::Confirmation,
        ]
    }

    /// One-based position used by progress headers.
    pub const fn number(self) -> u8 {
        match self {
            Self::Education => 1,
            Self::Skills => 2,
            Self::Sectors => 3,
            Self::Location => 4,
            Self::Confirmation => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Sectors => "Sectors",
            Self::Location => "Location",
            Self::Confirmation => "Confirmation",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Education => Some(Self::Skills),
            Self::Skills => Some(Self::Sectors),
            Self::Sectors => Some(Self::Location),
            Self::Location => Some(Self::Confirmation),
            Self::Confirmation => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Education => None,
            Self::Skills => Some(Self::Education),
            Self::Sectors => Some(Self::Skills),
            Self::Location => Some(Self::Sectors),
            Self::Confirmation => Some(Self::Location),
        }
    }
}

/// Result of a multi-select toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The selection cap was reached; nothing changed.
    Rejected,
}

/// Emitted when a single-select step completes and the presenter may advance on its own.
///
/// The hint only applies while the wizard is still on `completed`; see
/// [`ProfileBuilder::apply_auto_advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAdvance {
    pub completed: OnboardingStep,
    pub next: OnboardingStep,
}

/// Where a back press inside the wizard leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingBack {
    /// Leave the wizard; navigation takes over.
    Exit,
    Step(OnboardingStep),
}

/// Identity stamped onto a completed profile until the caller overrides it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIdentity {
    pub email: String,
    pub name: Option<String>,
}

impl Default for ProfileIdentity {
    fn default() -> Self {
        Self {
            email: "user@example.com".to_string(),
            name: Some("User".to_string()),
        }
    }
}

/// Mutable, possibly incomplete profile held while the wizard is live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub education: Option<String>,
    pub skills: BTreeSet<String>,
    pub sectors: BTreeSet<String>,
    pub location: Option<String>,
    pub city_input: String,
}

impl ProfileDraft {
    /// Structured selection wins over free text.
    pub fn resolved_location(&self) -> Option<String> {
        if let Some(location) = &self.location {
            return Some(location.clone());
        }

        let city = self.city_input.trim();
        (!city.is_empty()).then(|| city.to_string())
    }

    fn has_mandatory_fields(&self) -> bool {
        self.education.is_some() && !self.skills.is_empty() && !self.sectors.is_empty()
    }
}

/// Read-only view rendered on the confirmation step.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub education: Option<String>,
    pub skills: Vec<String>,
    pub sectors: Vec<String>,
    pub location: Option<String>,
    pub can_complete: bool,
}

#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    options: Arc<OptionLists>,
    step: OnboardingStep,
    draft: ProfileDraft,
}

impl ProfileBuilder {
    pub fn new(options: Arc<OptionLists>) -> Self {
        Self {
            options,
            step: OnboardingStep::Education,
            draft: ProfileDraft::default(),
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn options(&self) -> &OptionLists {
        &self.options
    }

    pub fn select_education(&mut self, value: &str) -> Result<AutoAdvance, ValidationError> {
        if !self.options.has_education(value) {
            return Err(unknown_option("education", value));
        }

        self.draft.education = Some(value.to_string());
        Ok(AutoAdvance {
            completed: OnboardingStep::Education,
            next: OnboardingStep::Skills,
        })
    }

    pub fn toggle_skill(&mut self, value: &str) -> Result<Toggle, ValidationError> {
        if !self.options.has_skill(value) {
            return Err(unknown_option("skill", value));
        }

        if self.draft.skills.remove(value) {
            Ok(Toggle::Removed)
        } else {
            self.draft.skills.insert(value.to_string());
            Ok(Toggle::Added)
        }
    }

    pub fn toggle_sector(&mut self, value: &str) -> Result<Toggle, ValidationError> {
        if !self.options.has_sector(value) {
            return Err(unknown_option("sector", value));
        }

        if self.draft.sectors.remove(value) {
            return Ok(Toggle::Removed);
        }

        if self.draft.sectors.len() >= MAX_SECTORS {
            debug!(sector = value, "sector cap reached; toggle ignored");
            return Ok(Toggle::Rejected);
        }

        self.draft.sectors.insert(value.to_string());
        Ok(Toggle::Added)
    }

    pub fn select_location(&mut self, value: &str) -> Result<AutoAdvance, ValidationError> {
        if !self.options.has_location(value) {
            return Err(unknown_option("location", value));
        }

        self.draft.location = Some(value.to_string());
        Ok(AutoAdvance {
            completed: OnboardingStep::Location,
            next: OnboardingStep::Confirmation,
        })
    }

    pub fn set_city_input(&mut self, value: impl Into<String>) {
        self.draft.city_input = value.into();
    }

    /// Applies a delayed auto-advance if the wizard has not moved since it was issued.
    pub fn apply_auto_advance(&mut self, hint: AutoAdvance) -> bool {
        if self.step != hint.completed || !self.can_proceed() {
            debug!(
                current = self.step.number(),
                completed = hint.completed.number(),
                "stale auto-advance ignored"
            );
            return false;
        }

        self.step = hint.next;
        true
    }

    pub fn can_proceed(&self) -> bool {
        match self.step {
            OnboardingStep::Education => self.draft.education.is_some(),
            OnboardingStep::Skills => !self.draft.skills.is_empty(),
            OnboardingStep::Sectors => !self.draft.sectors.is_empty(),
            OnboardingStep::Location => self.draft.resolved_location().is_some(),
            OnboardingStep::Confirmation => self.can_complete(),
        }
    }

    /// Moves to the next step; the final step stays put.
    pub fn advance(&mut self) -> Result<OnboardingStep, ValidationError> {
        if !self.can_proceed() {
            return Err(ValidationError::OnboardingStepIncomplete(self.step));
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> OnboardingBack {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                OnboardingBack::Step(previous)
            }
            None => OnboardingBack::Exit,
        }
    }

    /// Returns to the first step keeping every answer.
    pub fn edit(&mut self) -> Result<(), ValidationError> {
        if self.step != OnboardingStep::Confirmation {
            return Err(ValidationError::WrongStep {
                action: "edit",
                expected: OnboardingStep::Confirmation.label(),
            });
        }

        self.step = OnboardingStep::Education;
        Ok(())
    }

    pub fn can_complete(&self) -> bool {
        self.draft.has_mandatory_fields()
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            education: self.draft.education.clone(),
            skills: self.draft.skills.iter().cloned().collect(),
            sectors: self.draft.sectors.iter().cloned().collect(),
            location: self.draft.resolved_location(),
            can_complete: self.can_complete(),
        }
    }

    /// Finalizes the draft. Location was gated on step four and is not re-checked here.
    pub fn complete(&self, identity: &ProfileIdentity) -> Result<UserProfile, ValidationError> {
        if self.step != OnboardingStep::Confirmation {
            return Err(ValidationError::WrongStep {
                action: "complete",
                expected: OnboardingStep::Confirmation.label(),
            });
        }

        let education = self
            .draft
            .education
            .clone()
            .ok_or(ValidationError::MissingField("education"))?;
        if self.draft.skills.is_empty() {
            return Err(ValidationError::MissingField("skills"));
        }
        if self.draft.sectors.is_empty() {
            return Err(ValidationError::MissingField("sectors"));
        }

        Ok(UserProfile {
            email: identity.email.clone(),
            education,
            skills: self.draft.skills.clone(),
            sectors: self.draft.sectors.clone(),
            location: self.draft.resolved_location().unwrap_or_default(),
            name: identity.name.clone(),
        })
    }
}

fn unknown_option(field: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownOption {
        field,
        value: value.to_string(),
    }
}
