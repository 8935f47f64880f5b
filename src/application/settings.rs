//! Runtime knobs of an orchestrator session.

use std::time::Duration;

use crate::domain::conversation::DEFAULT_CONTEXT_WINDOW;

/// Per-session limits, shared read-only by every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorSettings {
    /// Messages included in the context passed to collaborators.
    pub context_window: usize,
    /// Upper bound on any single collaborator call.
    pub collaborator_timeout: Duration,
    /// Largest accepted attachment.
    pub max_attachment_bytes: usize,
    /// Sessions idle this long are dropped when new sessions are created.
    pub session_idle_timeout: Duration,
    /// Upper bound on live sessions.
    pub max_sessions: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            collaborator_timeout: Duration::from_secs(60),
            max_attachment_bytes: 10 * 1024 * 1024,
            session_idle_timeout: Duration::from_secs(60 * 60),
            max_sessions: 10_000,
        }
    }
}

impl OrchestratorSettings {
    pub fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = timeout;
        self
    }

    pub fn with_max_attachment_bytes(mut self, max: usize) -> Self {
        self.max_attachment_bytes = max;
        self
    }

    pub fn with_session_limits(mut self, idle_timeout: Duration, max_sessions: usize) -> Self {
        self.session_idle_timeout = idle_timeout;
        self.max_sessions = max_sessions;
        self
    }
}
