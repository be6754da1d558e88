use super::application::ApplicationStep;
use super::profile::OnboardingStep;

/// Raised when a wizard is asked to move past a step whose required fields are missing.
///
/// Presenters are expected to consult `can_proceed` and disable the action instead, so in a
/// correct integration these surface only when a caller skips that check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("onboarding step {} is incomplete", .0.number())]
    OnboardingStepIncomplete(OnboardingStep),
    #[error("application step {} is incomplete", .0.number())]
    ApplicationStepIncomplete(ApplicationStep),
    #[error("profile is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("`{value}` is not an available {field} option")]
    UnknownOption { field: &'static str, value: String },
    #[error("{action} is only available on the {expected} step")]
    WrongStep {
        action: &'static str,
        expected: &'static str,
    },
}

/// Raised by the documents step when an upload is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("resume must be a PDF file (received `{declared}`)")]
    InvalidFileType { declared: String },
}
