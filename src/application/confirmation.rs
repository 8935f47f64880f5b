//! Resolution of pending actions by yes/no replies.

use std::sync::Arc;
use std::time::Duration;

use super::collaborators::{bounded, Collaborators};
use crate::domain::action::{ConfirmationToken, PendingAction, PendingActionRegistry};
use crate::ports::{ActionExecutor, AttachmentStore, CourseDirectory, ExecutionRequest};

/// Reply when a token arrives with nothing pending.
pub const NOTHING_PENDING: &str = "There is no pending action to confirm or cancel.";

/// Executes or discards the pending action of one conversation.
///
/// Whatever happens during execution, the registry is empty afterwards.
pub struct ConfirmationController {
    directory: Arc<dyn CourseDirectory>,
    executor: Arc<dyn ActionExecutor>,
    attachments: Arc<dyn AttachmentStore>,
    timeout: Duration,
}

impl ConfirmationController {
    pub fn new(collaborators: &Collaborators, timeout: Duration) -> Self {
        Self {
            directory: collaborators.directory.clone(),
            executor: collaborators.executor.clone(),
            attachments: collaborators.attachments.clone(),
            timeout,
        }
    }

    /// Applies `token` to the registry and returns the reply text.
    pub async fn resolve(&self, token: ConfirmationToken, registry: &mut PendingActionRegistry) -> String {
        let Some(action) = registry.take() else {
            tracing::info!(?token, "Confirmation token with nothing pending");
            return NOTHING_PENDING.to_string();
        };

        match token {
            ConfirmationToken::Cancel => {
                tracing::info!(kind = %action.kind(), "Pending action cancelled");
                action.kind().cancelled_message()
            }
            ConfirmationToken::Affirm => self.execute(action).await,
        }
    }

    async fn execute(&self, action: PendingAction) -> String {
        let kind = action.kind();
        let course = action.course_name();

        let attachment_url = match action.attachment() {
            Some(file) => {
                match bounded(self.timeout, self.attachments.upload(&file.bytes, &file.filename)).await {
                    Ok(url) => Some(url),
                    Err(err) => {
                        tracing::error!(%kind, file = %file.filename, error = %err, "Attachment upload failed");
                        return format!("Failed to upload attachment '{}': {}", file.filename, err);
                    }
                }
            }
            None => None,
        };

        let course_id = match bounded(self.timeout, self.directory.resolve(course)).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::warn!(%kind, course, "Course not found");
                return format!(
                    "Could not find a course matching '{course}'. Nothing was {}.",
                    kind.past_tense()
                );
            }
            Err(err) => {
                tracing::warn!(%kind, course, error = %err, "Course lookup failed");
                return kind.failure_message(&format!("could not look up course '{course}': {err}"));
            }
        };

        let request = ExecutionRequest::from_pending(&action, course_id, attachment_url);
        match bounded(self.timeout, self.executor.execute(request)).await {
            Ok(outcome) if outcome.success => {
                tracing::info!(%kind, course, "Action executed");
                kind.success_message(action.title(), course)
            }
            Ok(outcome) => {
                tracing::error!(%kind, course, detail = %outcome.detail, "Action rejected by platform");
                kind.failure_message(&outcome.detail)
            }
            Err(err) => {
                tracing::error!(%kind, course, error = %err, "Action execution failed");
                kind.failure_message(&err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::*;
    use crate::domain::action::{ActionBody, ActionDraft, ActionKind, StagedAttachment};
    use crate::ports::{CollaboratorError, ExecutionOutcome};

    struct Fixture {
        directory: MockCourseDirectory,
        executor: MockActionExecutor,
        attachments: MockAttachmentStore,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                directory: MockCourseDirectory::new().with_course("Intro CS", "101"),
                executor: MockActionExecutor::new(),
                attachments: MockAttachmentStore::new(),
            }
        }

        fn controller(&self) -> ConfirmationController {
            let collaborators = Collaborators {
                classifier: Arc::new(MockIntentClassifier::new()),
                generator: Arc::new(MockContentGenerator::new()),
                directory: Arc::new(self.directory.clone()),
                executor: Arc::new(self.executor.clone()),
                attachments: Arc::new(self.attachments.clone()),
                researcher: Arc::new(MockWebResearcher::new()),
                library: Arc::new(MockResourceLibrary::new()),
            };
            ConfirmationController::new(&collaborators, Duration::from_secs(5))
        }
    }

    fn staged_quiz(course: &str) -> PendingActionRegistry {
        let mut registry = PendingActionRegistry::new();
        registry
            .stage(PendingAction::Quiz(ActionDraft::new(
                course,
                "Recursion",
                ActionBody::Text("Q1".into()),
            )))
            .unwrap();
        registry
    }

    mod affirm {
        use super::*;

        #[tokio::test]
        async fn executes_and_clears() {
            let fixture = Fixture::new();
            let mut registry = staged_quiz("intro cs");

            let reply = fixture.controller().resolve(ConfirmationToken::Affirm, &mut registry).await;

            assert_eq!(reply, "Successfully created quiz 'Recursion' in intro cs.");
            assert!(!registry.is_pending());
            let calls = fixture.executor.calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].kind, ActionKind::Quiz);
            assert_eq!(calls[0].course_id.as_str(), "101");
        }

        #[tokio::test]
        async fn platform_failure_still_clears() {
            let mut fixture = Fixture::new();
            fixture.executor = MockActionExecutor::new().with_outcome(ExecutionOutcome::failed("HTTP 500"));
            let mut registry = staged_quiz("Intro CS");

            let reply = fixture.controller().resolve(ConfirmationToken::Affirm, &mut registry).await;

            assert_eq!(reply, "Failed to create quiz: HTTP 500");
            assert!(!registry.is_pending());
        }

        #[tokio::test]
        async fn executor_error_still_clears() {
            let mut fixture = Fixture::new();
            fixture.executor =
                MockActionExecutor::new().with_error(CollaboratorError::Timeout { secs: 60 });
            let mut registry = staged_quiz("Intro CS");

            let reply = fixture.controller().resolve(ConfirmationToken::Affirm, &mut registry).await;

            assert!(reply.starts_with("Failed to create quiz"));
            assert!(!registry.is_pending());
        }

        #[tokio::test]
        async fn unknown_course_aborts_without_execution() {
            let fixture = Fixture::new();
            let mut registry = staged_quiz("Astrophysics");

            let reply = fixture.controller().resolve(ConfirmationToken::Affirm, &mut registry).await;

            assert!(reply.contains("Could not find a course matching 'Astrophysics'"));
            assert_eq!(fixture.executor.call_count(), 0);
            assert!(!registry.is_pending());
        }

        #[tokio::test]
        async fn attachment_is_uploaded_before_execution() {
            let fixture = Fixture::new();
            let mut registry = PendingActionRegistry::new();
            registry
                .stage(PendingAction::Announcement(
                    ActionDraft::new("Intro CS", "Notes", ActionBody::Text("See file".into()))
                        .with_attachment(Some(StagedAttachment::new("notes.pdf", vec![1, 2, 3]))),
                ))
                .unwrap();

            let reply = fixture.controller().resolve(ConfirmationToken::Affirm, &mut registry).await;

            assert_eq!(reply, "Successfully posted announcement 'Notes' to Intro CS.");
            assert_eq!(fixture.attachments.uploads(), vec![("notes.pdf".to_string(), 3)]);
            assert_eq!(
                fixture.executor.calls()[0].attachment_url.as_deref(),
                Some("https://files.test/notes.pdf")
            );
        }

        #[tokio::test]
        async fn upload_failure_aborts_and_clears() {
            let mut fixture = Fixture::new();
            fixture.attachments =
                MockAttachmentStore::new().with_error(CollaboratorError::Network("disk".into()));
            let mut registry = PendingActionRegistry::new();
            registry
                .stage(PendingAction::Page(
                    ActionDraft::new("Intro CS", "Notes", ActionBody::Text("x".into()))
                        .with_attachment(Some(StagedAttachment::new("notes.pdf", vec![1]))),
                ))
                .unwrap();

            let reply = fixture.controller().resolve(ConfirmationToken::Affirm, &mut registry).await;

            assert!(reply.starts_with("Failed to upload attachment 'notes.pdf'"));
            assert_eq!(fixture.executor.call_count(), 0);
            assert!(!registry.is_pending());
        }
    }

    mod cancel {
        use super::*;

        #[tokio::test]
        async fn discards_without_execution() {
            let fixture = Fixture::new();
            let mut registry = staged_quiz("Intro CS");

            let reply = fixture.controller().resolve(ConfirmationToken::Cancel, &mut registry).await;

            assert_eq!(reply, "Quiz cancelled.");
            assert_eq!(fixture.executor.call_count(), 0);
            assert!(!registry.is_pending());
        }
    }

    #[tokio::test]
    async fn nothing_pending_is_neutral() {
        let fixture = Fixture::new();
        let mut registry = PendingActionRegistry::new();

        for token in [ConfirmationToken::Affirm, ConfirmationToken::Cancel] {
            let reply = fixture.controller().resolve(token, &mut registry).await;
            assert_eq!(reply, NOTHING_PENDING);
        }
        assert_eq!(fixture.executor.call_count(), 0);
        assert!(fixture.directory.resolve_calls().is_empty());
    }
}
