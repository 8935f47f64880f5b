//! Assignment handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::common::Stager;
use super::{ActionHandler, HandlerError, HandlerOutcome, HandlerRequest};
use crate::domain::action::{ActionKind, AssignmentDraft, PendingAction};
use crate::domain::extraction;
use crate::domain::intent::IntentLabel;
use crate::ports::ContentGenerator;

/// Stages an assignment with points, due date and submission types.
///
/// Unparsable points fall back to the default and an unparsable due date
/// is dropped; neither is reported as an error.
pub struct AssignmentHandler {
    stager: Stager,
}

impl AssignmentHandler {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self {
            stager: Stager::new(ActionKind::Assignment, generator, timeout),
        }
    }
}

#[async_trait]
impl ActionHandler for AssignmentHandler {
    fn intent(&self) -> IntentLabel {
        IntentLabel::Assignment
    }

    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError> {
        let draft = self.stager.draft(&request).await?;
        let message = request.message;

        Ok(HandlerOutcome::stage(PendingAction::Assignment(AssignmentDraft {
            draft,
            points: extraction::points(message),
            due_at: extraction::due_date(message),
            submission_types: extraction::submission_types(message),
        })))
    }
}
