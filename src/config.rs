// src/config.rs
use std::time::Duration;

use crate::errors::{ClientError, Result};

/// Test-run configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the orchestrator API, including the version prefix.
    pub api_base: String,
    /// Fixed wait between polling attempts.
    pub poll_interval: Duration,
    /// Upper bound on polling attempts before giving up on a result.
    pub poll_max_attempts: usize,
}

impl AppConfig {
    /// Load configuration from environment variables. Every setting has a
    /// default suited to an orchestrator running locally.
    pub fn from_env() -> Result<Self> {
        let api_base = std::env::var("CALC_API_BASE")
            .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string());

        let poll_interval_ms = parse_or(
            std::env::var("CALC_POLL_INTERVAL_MS").ok(),
            "CALC_POLL_INTERVAL_MS",
            100u64,
        )?;
        let poll_max_attempts = parse_or(
            std::env::var("CALC_POLL_MAX_ATTEMPTS").ok(),
            "CALC_POLL_MAX_ATTEMPTS",
            600usize,
        )?;

        Ok(AppConfig {
            api_base,
            poll_interval: Duration::from_millis(poll_interval_ms),
            poll_max_attempts,
        })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, name: &str, default: T) -> Result<T> {
    match raw {
        Some(raw) => raw.trim().parse().map_err(|_| {
            ClientError::Config(format!("{} must be a number, got '{}'", name, raw))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_falls_back_to_default() {
        let parsed = parse_or(None, "CALC_POLL_INTERVAL_MS", 100u64).unwrap();
        assert_eq!(parsed, 100);
    }

    #[test]
    fn set_variable_overrides_default() {
        let parsed = parse_or(Some("250".to_string()), "CALC_POLL_INTERVAL_MS", 100u64).unwrap();
        assert_eq!(parsed, 250);
    }

    #[test]
    fn unparsable_variable_is_a_config_error() {
        let err = parse_or(Some("soon".to_string()), "CALC_POLL_MAX_ATTEMPTS", 600usize)
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
