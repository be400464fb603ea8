//! Client configuration management.
//!
//! Consolidates environment variable reads and provides validated
//! configuration for building a [`crate::api::RescueClient`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default directory name for persisted session state.
const DEFAULT_DATA_DIR: &str = "rescue_prefs";

/// Complete client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Directory holding persisted session state.
    pub data_dir: PathBuf,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing
    #[error("Missing required environment variable {var} ({hint})")]
    MissingRequired { var: String, hint: String },

    /// An environment variable holds an unusable value
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            data_dir: data_dir.into(),
            request_timeout: crate::transport::REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// * `RESCUE_API_URL` - backend base URL (required)
    /// * `RESCUE_DATA_DIR` - session storage directory (default `rescue_prefs`)
    /// * `RESCUE_REQUEST_TIMEOUT_SECS` - per-request timeout (default 30)
    ///
    /// # Errors
    ///
    /// Returns an error if `RESCUE_API_URL` is missing or malformed, or if
    /// the timeout value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var("RESCUE_API_URL").map_err(|_| ConfigError::MissingRequired {
                var: "RESCUE_API_URL".to_string(),
                hint: "e.g. https://rescue.example.com".to_string(),
            })?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "RESCUE_API_URL".to_string(),
                value: base_url,
            });
        }

        let data_dir = std::env::var("RESCUE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let request_timeout = match std::env::var("RESCUE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "RESCUE_REQUEST_TIMEOUT_SECS".to_string(),
                    value: raw,
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => crate::transport::REQUEST_TIMEOUT,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            data_dir,
            request_timeout,
        })
    }
}
