//! Credential checks for the login screen.
//!
//! Authentication is mocked: any well-formed email with a long-enough password is accepted.
//! Real identity providers plug in behind [`Authenticator`].

use serde::Serialize;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: CredentialField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Accepted { email: String },
    Rejected(Vec<FieldIssue>),
}

impl AuthDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

pub trait Authenticator {
    fn authenticate(&self, email: &str, password: &str) -> AuthDecision;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MockAuthenticator;

impl Authenticator for MockAuthenticator {
    fn authenticate(&self, email: &str, password: &str) -> AuthDecision {
        let issues = validate_credentials(email, password);
        if issues.is_empty() {
            AuthDecision::Accepted {
                email: email.trim().to_string(),
            }
        } else {
            AuthDecision::Rejected(issues)
        }
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    let email = email.trim();

    if email.is_empty() {
        issues.push(FieldIssue {
            field: CredentialField::Email,
            message: "Email is required",
        });
    } else if !looks_like_email(email) {
        issues.push(FieldIssue {
            field: CredentialField::Email,
            message: "Invalid email format",
        });
    }

    if password.is_empty() {
        issues.push(FieldIssue {
            field: CredentialField::Password,
            message: "Password is required",
        });
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(FieldIssue {
            field: CredentialField::Password,
            message: "Password must be at least 6 characters",
        });
    }

    issues
}

/// Loose `local@domain.tld` shape: no whitespace, an `@`, and a dot with text on both sides
/// somewhere after it.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some(at) = value.find('@') else {
        return false;
    };
    let (local, rest) = (&value[..at], &value[at + 1..]);
    if local.is_empty() {
        return false;
    }

    rest.char_indices().any(|(index, ch)| {
        ch == '.' && index > 0 && index + 1 < rest.len()
    })
}
