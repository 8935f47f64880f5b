//! Web Researcher Port - answers questions about web content.

use async_trait::async_trait;

use super::CollaboratorError;

#[async_trait]
pub trait WebResearcher: Send + Sync {
    /// Answers `question`, reading `url` first when one is given.
    async fn answer(&self, url: Option<&str>, question: &str) -> Result<String, CollaboratorError>;
}
