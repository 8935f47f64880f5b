//! Action handlers, one per intent.
//!
//! A handler validates its preconditions, extracts parameters, optionally
//! calls collaborators, and produces either an immediate reply or a staged
//! [`PendingAction`] with its confirmation summary. Handlers never touch
//! the registry themselves; the orchestrator stages what they return.

mod announcement;
mod assignment;
mod common;
mod general;
mod listing;
mod page;
mod quiz;
mod web_search;

use async_trait::async_trait;
use thiserror::Error;

pub use announcement::AnnouncementHandler;
pub use assignment::AssignmentHandler;
pub use general::GeneralHandler;
pub use listing::ListingHandler;
pub use page::PageHandler;
pub use quiz::QuizHandler;
pub use web_search::WebSearchHandler;

use super::collaborators::Collaborators;
use super::settings::OrchestratorSettings;
use crate::domain::action::{ActionKind, PendingAction, StagedAttachment};
use crate::domain::foundation::ErrorCode;
use crate::domain::intent::IntentLabel;
use crate::ports::CollaboratorError;

/// Everything a handler may look at for one message.
#[derive(Debug, Clone, Copy)]
pub struct HandlerRequest<'a> {
    pub message: &'a str,
    /// Rendered recent context, captured before this message was appended.
    pub context: &'a str,
    pub attachment: Option<&'a StagedAttachment>,
    /// Kind of the action currently awaiting confirmation, if any.
    pub pending: Option<ActionKind>,
}

impl<'a> HandlerRequest<'a> {
    pub fn new(message: &'a str, context: &'a str) -> Self {
        Self {
            message,
            context,
            attachment: None,
            pending: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Option<&'a StagedAttachment>) -> Self {
        self.attachment = attachment;
        self
    }

    pub fn with_pending(mut self, pending: Option<ActionKind>) -> Self {
        self.pending = pending;
        self
    }

    /// Context for collaborators, `None` on a fresh conversation.
    pub fn context(&self) -> Option<&'a str> {
        (!self.context.is_empty()).then_some(self.context)
    }
}

/// Successful handler result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub response: String,
    pub staged: Option<PendingAction>,
}

impl HandlerOutcome {
    pub fn reply(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            staged: None,
        }
    }

    /// Stages `action`, answering with its summary.
    pub fn stage(action: PendingAction) -> Self {
        Self {
            response: action.summary(),
            staged: Some(action),
        }
    }
}

/// Handler failure; the display text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("Please specify a course name in square brackets, e.g. [Intro CS].")]
    MissingScope,

    #[error("Please describe the {kind} you want to {verb}.", verb = .kind.verb())]
    MissingContent { kind: ActionKind },

    #[error(
        "You already have a pending {pending} awaiting confirmation. \
         Reply \"yes\" to {verb} it or \"no\" to cancel it before starting something new.",
        verb = .pending.verb()
    )]
    AlreadyPending { pending: ActionKind },

    #[error("Failed to generate {kind} content: {source}")]
    Generation {
        kind: ActionKind,
        source: CollaboratorError,
    },

    #[error("Failed to {task}: {source}")]
    Collaborator {
        task: &'static str,
        source: CollaboratorError,
    },
}

impl HandlerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HandlerError::MissingScope => ErrorCode::MissingScope,
            HandlerError::MissingContent { .. } => ErrorCode::MissingContent,
            HandlerError::AlreadyPending { .. } => ErrorCode::ActionAlreadyPending,
            HandlerError::Generation { source, .. } | HandlerError::Collaborator { source, .. } => {
                if source.is_timeout() {
                    ErrorCode::CollaboratorTimeout
                } else {
                    ErrorCode::CollaboratorFailed
                }
            }
        }
    }

    /// Returns true for mistakes in the user's request.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            HandlerError::MissingScope
                | HandlerError::MissingContent { .. }
                | HandlerError::AlreadyPending { .. }
        )
    }
}

/// Port-like seam every handler implements.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Intent this handler serves.
    fn intent(&self) -> IntentLabel;

    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError>;
}

/// One handler per intent, built from the shared collaborator bundle.
pub struct HandlerSet {
    announcement: AnnouncementHandler,
    quiz: QuizHandler,
    assignment: AssignmentHandler,
    page: PageHandler,
    listing: ListingHandler,
    web_search: WebSearchHandler,
    general: GeneralHandler,
}

impl HandlerSet {
    pub fn new(collaborators: &Collaborators, settings: &OrchestratorSettings) -> Self {
        let timeout = settings.collaborator_timeout;
        Self {
            announcement: AnnouncementHandler::new(collaborators.generator.clone(), timeout),
            quiz: QuizHandler::new(collaborators.generator.clone(), timeout),
            assignment: AssignmentHandler::new(collaborators.generator.clone(), timeout),
            page: PageHandler::new(collaborators.generator.clone(), timeout),
            listing: ListingHandler::new(
                collaborators.directory.clone(),
                collaborators.library.clone(),
                timeout,
            ),
            web_search: WebSearchHandler::new(collaborators.researcher.clone(), timeout),
            general: GeneralHandler::new(collaborators.generator.clone(), timeout),
        }
    }

    pub fn for_intent(&self, label: IntentLabel) -> &dyn ActionHandler {
        match label {
            IntentLabel::Post => &self.announcement,
            IntentLabel::Quiz => &self.quiz,
            IntentLabel::Assignment => &self.assignment,
            IntentLabel::Page => &self.page,
            IntentLabel::List => &self.listing,
            IntentLabel::WebSearch => &self.web_search,
            IntentLabel::General => &self.general,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_render_guidance() {
        assert!(HandlerError::MissingScope
            .to_string()
            .starts_with("Please specify a course name in square brackets"));
        assert_eq!(
            HandlerError::MissingContent { kind: ActionKind::Announcement }.to_string(),
            "Please describe the announcement you want to post."
        );
    }

    #[test]
    fn already_pending_names_the_pending_kind() {
        let text = HandlerError::AlreadyPending { pending: ActionKind::Quiz }.to_string();
        assert!(text.contains("pending quiz"));
        assert!(text.contains("\"no\" to cancel"));
    }

    #[test]
    fn codes_distinguish_timeouts() {
        let timeout = HandlerError::Collaborator {
            task: "list courses",
            source: CollaboratorError::Timeout { secs: 60 },
        };
        let failure = HandlerError::Generation {
            kind: ActionKind::Quiz,
            source: CollaboratorError::Network("reset".into()),
        };
        assert_eq!(timeout.code(), ErrorCode::CollaboratorTimeout);
        assert_eq!(failure.code(), ErrorCode::CollaboratorFailed);
        assert!(!failure.is_user_error());
        assert!(HandlerError::MissingScope.is_user_error());
    }

    #[test]
    fn every_intent_has_a_handler() {
        use crate::adapters::mock::*;
        use std::sync::Arc;

        let collaborators = Collaborators {
            classifier: Arc::new(MockIntentClassifier::new()),
            generator: Arc::new(MockContentGenerator::new()),
            directory: Arc::new(MockCourseDirectory::new()),
            executor: Arc::new(MockActionExecutor::new()),
            attachments: Arc::new(MockAttachmentStore::new()),
            researcher: Arc::new(MockWebResearcher::new()),
            library: Arc::new(MockResourceLibrary::new()),
        };
        let set = HandlerSet::new(&collaborators, &OrchestratorSettings::default());

        for label in IntentLabel::ALL {
            assert_eq!(set.for_intent(label).intent(), label);
        }
    }
}
