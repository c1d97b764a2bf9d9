//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("History limit must be between 1 and {max}, got {got}")]
    InvalidHistoryLimit { got: usize, max: usize },

    #[error("Typing delay exceeds maximum allowed ({max} ms)")]
    TypingDelayTooLong { max: u64 },

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
