//! Announcement handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::common::Stager;
use super::{ActionHandler, HandlerError, HandlerOutcome, HandlerRequest};
use crate::domain::action::{ActionKind, PendingAction};
use crate::domain::intent::IntentLabel;
use crate::ports::ContentGenerator;

/// Stages a course announcement.
pub struct AnnouncementHandler {
    stager: Stager,
}

impl AnnouncementHandler {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self {
            stager: Stager::new(ActionKind::Announcement, generator, timeout),
        }
    }
}

#[async_trait]
impl ActionHandler for AnnouncementHandler {
    fn intent(&self) -> IntentLabel {
        IntentLabel::Post
    }

    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError> {
        let draft = self.stager.draft(&request).await?;
        Ok(HandlerOutcome::stage(PendingAction::Announcement(draft)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockContentGenerator;

    #[tokio::test]
    async fn stages_announcement_with_summary() {
        let generator = MockContentGenerator::new()
            .with_reply("The lab moves to Friday.")
            .with_reply("Lab Schedule Change");
        let handler = AnnouncementHandler::new(Arc::new(generator), Duration::from_secs(5));

        let outcome = handler
            .handle(HandlerRequest::new("announce [Bio 101] lab moves to friday", ""))
            .await
            .unwrap();

        let staged = outcome.staged.unwrap();
        assert_eq!(staged.kind(), ActionKind::Announcement);
        assert_eq!(staged.course_name(), "Bio 101");
        assert_eq!(staged.title(), "Lab Schedule Change");
        assert!(outcome.response.contains("Would you like me to post this announcement?"));
    }

    #[tokio::test]
    async fn missing_scope_stages_nothing() {
        let handler =
            AnnouncementHandler::new(Arc::new(MockContentGenerator::new()), Duration::from_secs(5));

        let err = handler
            .handle(HandlerRequest::new("post something", ""))
            .await
            .unwrap_err();

        assert_eq!(err, HandlerError::MissingScope);
    }
}
