//! Web search handler: answers a question about a URL or the web.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ActionHandler, HandlerError, HandlerOutcome, HandlerRequest};
use crate::application::collaborators::bounded;
use crate::domain::extraction;
use crate::domain::intent::IntentLabel;
use crate::ports::WebResearcher;

/// Question asked when the message is only a URL.
pub const DEFAULT_QUESTION: &str = "What is the main information in this content?";

const GUIDANCE: &str = "Please provide a URL or a question to search for, \
                        e.g. \"What does https://example.com say about deadlines?\"";

pub struct WebSearchHandler {
    researcher: Arc<dyn WebResearcher>,
    timeout: Duration,
}

impl WebSearchHandler {
    pub fn new(researcher: Arc<dyn WebResearcher>, timeout: Duration) -> Self {
        Self {
            researcher,
            timeout,
        }
    }
}

#[async_trait]
impl ActionHandler for WebSearchHandler {
    fn intent(&self) -> IntentLabel {
        IntentLabel::WebSearch
    }

    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError> {
        let (url, question) = extraction::url_and_question(request.message);
        let question = match (&url, question) {
            (None, None) => return Ok(HandlerOutcome::reply(GUIDANCE)),
            (Some(_), None) => DEFAULT_QUESTION.to_string(),
            (_, Some(q)) => q,
        };

        let answer = bounded(self.timeout, self.researcher.answer(url.as_deref(), &question))
            .await
            .map_err(|source| HandlerError::Collaborator {
                task: "search the web",
                source,
            })?;

        Ok(HandlerOutcome::reply(answer))
    }
}
