//! Intent Classifier Port - maps a message onto an intent label.

use async_trait::async_trait;

use super::CollaboratorError;

/// External classifier consulted when no pre-filter rule fires.
///
/// The reply is free text; callers normalise it with
/// [`IntentLabel::from_classifier_reply`](crate::domain::intent::IntentLabel::from_classifier_reply).
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classifies `text` given the rendered recent `context` (may be empty).
    async fn classify(&self, text: &str, context: &str) -> Result<String, CollaboratorError>;
}
