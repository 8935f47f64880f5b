//! Local storage configuration

use serde::Deserialize;

use super::error::{require_http_url, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory receiving uploaded attachments
    #[serde(default = "default_attachment_dir")]
    pub attachment_dir: String,

    /// URL prefix under which `attachment_dir` is served; the API serves it at `/files`
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Directory whose sub-directories form the resource library
    #[serde(default = "default_resource_dir")]
    pub resource_dir: String,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.attachment_dir.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__ATTACHMENT_DIR"));
        }
        if self.resource_dir.trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__RESOURCE_DIR"));
        }
        require_http_url("storage.public_base_url", &self.public_base_url)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            attachment_dir: default_attachment_dir(),
            public_base_url: default_public_base_url(),
            resource_dir: default_resource_dir(),
        }
    }
}

fn default_attachment_dir() -> String {
    "./data/attachments".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8000/files".to_string()
}

fn default_resource_dir() -> String {
    "./data/resources".to_string()
}
