//! Course page handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::common::Stager;
use super::{ActionHandler, HandlerError, HandlerOutcome, HandlerRequest};
use crate::domain::action::{ActionKind, PendingAction};
use crate::domain::intent::IntentLabel;
use crate::ports::ContentGenerator;

pub struct PageHandler {
    stager: Stager,
}

impl PageHandler {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self {
            stager: Stager::new(ActionKind::Page, generator, timeout),
        }
    }
}

#[async_trait]
impl ActionHandler for PageHandler {
    fn intent(&self) -> IntentLabel {
        IntentLabel::Page
    }

    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError> {
        let draft = self.stager.draft(&request).await?;
        Ok(HandlerOutcome::stage(PendingAction::Page(draft)))
    }
}
