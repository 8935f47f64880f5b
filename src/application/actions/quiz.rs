//! Quiz handler.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::common::Stager;
use super::{ActionHandler, HandlerError, HandlerOutcome, HandlerRequest};
use crate::domain::action::{ActionKind, PendingAction};
use crate::domain::intent::IntentLabel;
use crate::ports::ContentGenerator;

/// Stages a quiz, generated or taken verbatim from an answer key.
pub struct QuizHandler {
    stager: Stager,
}

impl QuizHandler {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self {
            stager: Stager::new(ActionKind::Quiz, generator, timeout),
        }
    }
}

#[async_trait]
impl ActionHandler for QuizHandler {
    fn intent(&self) -> IntentLabel {
        IntentLabel::Quiz
    }

    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError> {
        let draft = self.stager.draft(&request).await?;
        Ok(HandlerOutcome::stage(PendingAction::Quiz(draft)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockContentGenerator;
    use crate::ports::PromptKind;

    #[tokio::test]
    async fn stages_generated_quiz() {
        let generator = MockContentGenerator::new();
        let handler = QuizHandler::new(Arc::new(generator.clone()), Duration::from_secs(5));

        let outcome = handler
            .handle(HandlerRequest::new("create a quiz [Intro CS] about recursion", ""))
            .await
            .unwrap();

        assert_eq!(outcome.staged.map(|a| a.kind()), Some(ActionKind::Quiz));
        assert!(outcome.response.contains("Would you like me to create this quiz?"));
        let calls = generator.calls();
        assert_eq!(calls[0].kind, PromptKind::Quiz);
        assert_eq!(calls[0].text, "create a quiz about recursion");
        assert_eq!(calls[1].kind, PromptKind::Title);
    }
}
