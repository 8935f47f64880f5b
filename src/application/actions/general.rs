//! General assistant replies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ActionHandler, HandlerError, HandlerOutcome, HandlerRequest};
use crate::application::collaborators::bounded;
use crate::domain::intent::IntentLabel;
use crate::ports::{ContentGenerator, PromptKind};

pub struct GeneralHandler {
    generator: Arc<dyn ContentGenerator>,
    timeout: Duration,
}

impl GeneralHandler {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }
}

#[async_trait]
impl ActionHandler for GeneralHandler {
    fn intent(&self) -> IntentLabel {
        IntentLabel::General
    }

    /// Never fails: a generator error becomes an apology.
    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError> {
        let reply = bounded(
            self.timeout,
            self.generator
                .generate(PromptKind::General, request.message, request.context()),
        )
        .await;

        Ok(HandlerOutcome::reply(match reply {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "General reply generation failed");
                format!("I'm sorry, I couldn't process your request right now ({err}).")
            }
        }))
    }
}
