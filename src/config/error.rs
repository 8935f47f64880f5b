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

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid URL for {field}: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("Context window must be between 1 and 50")]
    InvalidContextWindow,

    #[error("Collaborator timeout must be between 1 and 300 seconds")]
    InvalidCollaboratorTimeout,

    #[error("Maximum attachment size must be positive")]
    InvalidAttachmentLimit,

    #[error("Session idle timeout and session cap must be positive")]
    InvalidSessionLimits,
}

/// Checks that `value` looks like an absolute http(s) URL.
pub(crate) fn require_http_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}
