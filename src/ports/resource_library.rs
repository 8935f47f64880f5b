//! Resource Library Port - folders of reference material.

use async_trait::async_trait;

use super::CollaboratorError;
use crate::domain::listing::ResourceFolder;

#[async_trait]
pub trait ResourceLibrary: Send + Sync {
    async fn list_folders(&self) -> Result<Vec<ResourceFolder>, CollaboratorError>;
}
