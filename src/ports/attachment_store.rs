//! Attachment Store Port - persists uploaded files and returns a link.

use async_trait::async_trait;

use super::CollaboratorError;

#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Stores `bytes` and returns a URL the course platform can link to.
    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, CollaboratorError>;
}
