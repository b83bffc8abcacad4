//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating [`crate::config::DeckConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The config file exists but is not valid JSON for the expected shape.
    #[error("Invalid config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A URL setting is not an http(s)/ws(s) URL.
    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    /// A numeric setting is out of range.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ConfigError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Parse { .. } => "E_CFG_PARSE",
            ConfigError::InvalidUrl { .. } => "E_CFG_URL",
            ConfigError::InvalidValue { .. } => "E_CFG_VALUE",
        }
    }
}
