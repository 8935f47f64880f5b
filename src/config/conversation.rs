//! Conversation limits

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::OrchestratorSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Messages passed to collaborators as recent context
    #[serde(default = "default_context_window")]
    pub context_window: usize,

    /// Bound on any single collaborator call, in seconds
    #[serde(default = "default_collaborator_timeout")]
    pub collaborator_timeout_secs: u64,

    /// Largest accepted attachment, in bytes
    #[serde(default = "default_max_attachment_bytes")]
    pub max_attachment_bytes: usize,

    /// Idle time after which a session may be evicted, in seconds
    #[serde(default = "default_session_idle")]
    pub session_idle_secs: u64,

    /// Upper bound on live sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl ConversationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=50).contains(&self.context_window) {
            return Err(ValidationError::InvalidContextWindow);
        }
        if !(1..=300).contains(&self.collaborator_timeout_secs) {
            return Err(ValidationError::InvalidCollaboratorTimeout);
        }
        if self.max_attachment_bytes == 0 {
            return Err(ValidationError::InvalidAttachmentLimit);
        }
        if self.session_idle_secs == 0 || self.max_sessions == 0 {
            return Err(ValidationError::InvalidSessionLimits);
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            context_window: default_context_window(),
            collaborator_timeout_secs: default_collaborator_timeout(),
            max_attachment_bytes: default_max_attachment_bytes(),
            session_idle_secs: default_session_idle(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl From<&ConversationConfig> for OrchestratorSettings {
    fn from(config: &ConversationConfig) -> Self {
        OrchestratorSettings {
            context_window: config.context_window,
            collaborator_timeout: Duration::from_secs(config.collaborator_timeout_secs),
            max_attachment_bytes: config.max_attachment_bytes,
            session_idle_timeout: Duration::from_secs(config.session_idle_secs),
            max_sessions: config.max_sessions,
        }
    }
}

fn default_context_window() -> usize {
    5
}

fn default_collaborator_timeout() -> u64 {
    60
}

fn default_max_attachment_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_session_idle() -> u64 {
    60 * 60
}

fn default_max_sessions() -> usize {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_orchestrator_defaults() {
        let settings = OrchestratorSettings::from(&ConversationConfig::default());
        assert_eq!(settings, OrchestratorSettings::default());
    }

    #[test]
    fn bounds_are_enforced() {
        let config = ConversationConfig {
            context_window: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidContextWindow));

        let config = ConversationConfig {
            collaborator_timeout_secs: 301,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCollaboratorTimeout));

        let config = ConversationConfig {
            max_sessions: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionLimits));

        let config = ConversationConfig {
            context_window: 50,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
