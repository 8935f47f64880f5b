//! Canvas LMS configuration

use serde::Deserialize;

use super::error::{require_http_url, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    /// Personal access token
    pub api_key: String,

    /// Instance root, e.g. `https://school.instructure.com`
    pub base_url: String,
}

impl CanvasConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CANVAS__API_KEY"));
        }
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("CANVAS__BASE_URL"));
        }
        require_http_url("canvas.base_url", &self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> CanvasConfig {
        CanvasConfig {
            api_key: "token".into(),
            base_url: base_url.into(),
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(config("https://canvas.test/").base_url(), "https://canvas.test");
    }

    #[test]
    fn empty_values_are_rejected() {
        assert!(config("").validate().is_err());
        let mut no_key = config("https://canvas.test");
        no_key.api_key = " ".into();
        assert_eq!(
            no_key.validate(),
            Err(ValidationError::MissingRequired("CANVAS__API_KEY"))
        );
    }
}
