//! Bundle of collaborator handles shared by all sessions.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::ports::{
    ActionExecutor, AttachmentStore, CollaboratorError, ContentGenerator, CourseDirectory,
    IntentClassifier, ResourceLibrary, WebResearcher,
};

/// Stateless collaborator handles.
///
/// Cloning is cheap; sessions rebuild their handlers from this bundle on
/// reset.
#[derive(Clone)]
pub struct Collaborators {
    pub classifier: Arc<dyn IntentClassifier>,
    pub generator: Arc<dyn ContentGenerator>,
    pub directory: Arc<dyn CourseDirectory>,
    pub executor: Arc<dyn ActionExecutor>,
    pub attachments: Arc<dyn AttachmentStore>,
    pub researcher: Arc<dyn WebResearcher>,
    pub library: Arc<dyn ResourceLibrary>,
}

/// Runs a collaborator call, converting an elapsed `limit` into
/// [`CollaboratorError::Timeout`].
pub async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, CollaboratorError>
where
    F: Future<Output = Result<T, CollaboratorError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(CollaboratorError::Timeout {
            secs: limit.as_secs(),
        }),
    }
}
