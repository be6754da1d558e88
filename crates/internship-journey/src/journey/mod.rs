//! Applicant journey engine: screen navigation, the onboarding and application wizards, and
//! recommendation ranking over a fixed candidate catalog.

pub mod application;
pub mod auth;
pub mod catalog;
pub mod details;
pub mod domain;
pub mod error;
pub mod navigation;
pub mod options;
pub mod profile;
pub mod recommendations;
pub mod session;
pub mod status;

#[cfg(test)]
mod tests;

pub use application::{
    application_id_for, ApplicationBack, ApplicationBuilder, ApplicationDraft,
    ApplicationIdSource, ApplicationStep, RandomSuffix, UploadedResume,
};
pub use auth::{AuthDecision, Authenticator, CredentialField, FieldIssue, MockAuthenticator};
pub use catalog::{CandidateCatalog, CatalogError};
pub use details::{CandidateDetails, SkillBadge, SkillMatch};
pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, Availability, Candidate, CandidateId,
    FileReference, ResumeRef, UserProfile, WorkHours, WorkMode, MAX_SECTORS,
};
pub use error::{DocumentError, ValidationError};
pub use navigation::{
    transition, GuardViolation, MatchTicket, NavigationController, NavigationEvent,
    NavigationState, Screen, Transition,
};
pub use options::{ChatPrompts, OptionLists};
pub use profile::{
    AutoAdvance, OnboardingBack, OnboardingStep, ProfileBuilder, ProfileDraft, ProfileIdentity,
    ProfileSummary, Toggle,
};
pub use recommendations::{
    rank, stipend_value, Filter, RankedCandidate, RecommendationEngine, RecommendationView,
    SavedCandidates, SortKey,
};
pub use session::{JourneyError, JourneySession};
pub use status::{ApplicationStatusView, Milestone, MilestoneState, MilestoneTiming};
