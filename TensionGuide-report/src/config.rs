use std::env;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

/// Default analysis period in days
pub const DEFAULT_PERIOD_DAYS: u32 = 30;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// JSON file holding the measurements to analyze
    pub readings_path: PathBuf,
    /// Window for insights, counted back from the newest measurement
    pub period_days: u32,
    /// Pretty-print the JSON report
    pub pretty: bool,
}

impl ReportConfig {
    /// Create a configuration from environment variables.
    ///
    /// `path_arg` (the first command-line argument) overrides `TENSION_READINGS_PATH`.
    pub fn from_env(path_arg: Option<String>) -> Result<Self, ConfigError> {
        Self::from_lookup(path_arg, |key| env::var(key).ok())
    }

    /// Create a configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(path_arg: Option<String>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let readings_path = path_arg
            .or_else(|| lookup("TENSION_READINGS_PATH"))
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::EnvVarNotFound("TENSION_READINGS_PATH".to_string()))?;

        let period_days = match lookup("TENSION_PERIOD_DAYS") {
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
                warn!("Invalid TENSION_PERIOD_DAYS '{}', using {}", raw, DEFAULT_PERIOD_DAYS);
                DEFAULT_PERIOD_DAYS
            }),
            None => DEFAULT_PERIOD_DAYS,
        };

        let pretty = lookup("TENSION_PRETTY")
            .map(|raw| !matches!(raw.to_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        info!(
            "Report configuration: readings={}, period_days={}, pretty={}",
            readings_path.display(),
            period_days,
            pretty
        );

        Ok(ReportConfig {
            readings_path,
            period_days,
            pretty,
        })
    }
}
