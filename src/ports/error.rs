//! Error type shared by every collaborator port.

use thiserror::Error;

/// Failure of an external collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The call did not finish within the configured bound.
    #[error("timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The remote service answered with an error status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The remote answer could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The collaborator is not configured or refuses requests.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl CollaboratorError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, CollaboratorError::Timeout { .. })
    }
}
