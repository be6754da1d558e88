use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::journey::ProfileIdentity;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub journey: JourneyConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let matching_delay = millis_var("JOURNEY_MATCHING_DELAY_MS", 3000)?;
        let auto_advance_delay = millis_var("JOURNEY_AUTO_ADVANCE_MS", 500)?;
        let default_email =
            env::var("JOURNEY_DEFAULT_EMAIL").unwrap_or_else(|_| "user@example.com".to_string());
        let default_name = env::var("JOURNEY_DEFAULT_NAME").unwrap_or_else(|_| "User".to_string());
        let catalog_path = env::var("JOURNEY_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let format = LogFormat::from_str(&env::var("APP_LOG_FORMAT").unwrap_or_default());

        Ok(Self {
            environment,
            journey: JourneyConfig {
                matching_delay,
                auto_advance_delay,
                default_email,
                default_name,
                catalog_path,
            },
            telemetry: TelemetryConfig { log_level, format },
        })
    }
}

fn millis_var(var: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(Duration::from_millis(default)),
    }
}

/// Timing and identity defaults for a journey session.
#[derive(Debug, Clone)]
pub struct JourneyConfig {
    /// How long the loading screen waits before signaling that matching finished.
    pub matching_delay: Duration,
    /// Presentation delay before a single-select onboarding step advances on its own.
    pub auto_advance_delay: Duration,
    pub default_email: String,
    pub default_name: String,
    /// CSV or JSON catalog replacing the built-in candidates.
    pub catalog_path: Option<PathBuf>,
}

impl JourneyConfig {
    pub fn identity(&self) -> ProfileIdentity {
        let name = self.default_name.trim();
        ProfileIdentity {
            email: self.default_email.trim().to_string(),
            name: (!name.is_empty()).then(|| name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a non-negative number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
