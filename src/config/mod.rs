//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `CANVAS_ORCHESTRATOR`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use canvas_orchestrator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod canvas;
mod conversation;
mod error;
mod server;
mod storage;

pub use ai::AiConfig;
pub use canvas::CanvasConfig;
pub use conversation::ConversationConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CANVAS_ORCHESTRATOR";

/// Root application configuration
///
/// Read once at start-up and shared read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat completion endpoint
    #[serde(default)]
    pub ai: AiConfig,

    /// Canvas LMS instance
    pub canvas: CanvasConfig,

    /// Local attachment and resource directories
    #[serde(default)]
    pub storage: StorageConfig,

    /// Conversation limits
    #[serde(default)]
    pub conversation: ConversationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present
    /// 2. Reads variables with the `CANVAS_ORCHESTRATOR` prefix
    /// 3. Uses `__` to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CANVAS_ORCHESTRATOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CANVAS_ORCHESTRATOR__CANVAS__BASE_URL=...` -> `canvas.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all sections, reporting the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.canvas.validate()?;
        self.storage.validate()?;
        self.conversation.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialise the tests touching them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const MINIMAL: [(&str, &str); 3] = [
        ("CANVAS_ORCHESTRATOR__AI__OPENAI_API_KEY", "sk-test"),
        ("CANVAS_ORCHESTRATOR__CANVAS__API_KEY", "canvas-token"),
        ("CANVAS_ORCHESTRATOR__CANVAS__BASE_URL", "https://canvas.test/"),
    ];

    const OPTIONAL: [&str; 4] = [
        "CANVAS_ORCHESTRATOR__SERVER__PORT",
        "CANVAS_ORCHESTRATOR__SERVER__ENVIRONMENT",
        "CANVAS_ORCHESTRATOR__CONVERSATION__CONTEXT_WINDOW",
        "CANVAS_ORCHESTRATOR__CONVERSATION__COLLABORATOR_TIMEOUT_SECS",
    ];

    fn set_minimal_env() {
        for (key, value) in MINIMAL {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in MINIMAL {
            env::remove_var(key);
        }
        for key in OPTIONAL {
            env::remove_var(key);
        }
    }

    fn load_with(extra: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        set_minimal_env();
        for (key, value) in extra {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.canvas.base_url(), "https://canvas.test");
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.conversation.context_window, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_are_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("CANVAS_ORCHESTRATOR__SERVER__PORT", "3000"),
            ("CANVAS_ORCHESTRATOR__SERVER__ENVIRONMENT", "production"),
            ("CANVAS_ORCHESTRATOR__CONVERSATION__CONTEXT_WINDOW", "8"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.conversation.context_window, 8);
    }

    #[test]
    fn test_out_of_range_values_fail_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[(
            "CANVAS_ORCHESTRATOR__CONVERSATION__COLLABORATOR_TIMEOUT_SECS",
            "0",
        )])
        .unwrap();

        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidCollaboratorTimeout)
        );
    }

    #[test]
    fn test_missing_canvas_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("CANVAS_ORCHESTRATOR__AI__OPENAI_API_KEY", "sk-test");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
