//! Content Generator Port - text synthesis for titles and bodies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::CollaboratorError;
use crate::domain::action::ActionKind;

/// What the generator is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// A short title for the given body.
    Title,
    Announcement,
    Quiz,
    Assignment,
    Page,
    /// A free-form assistant reply.
    General,
    /// An answer to a question about fetched web content.
    WebAnswer,
}

impl PromptKind {
    /// Prompt kind that produces the body of `kind`.
    pub fn for_action(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Quiz => PromptKind::Quiz,
            ActionKind::Announcement => PromptKind::Announcement,
            ActionKind::Assignment => PromptKind::Assignment,
            ActionKind::Page => PromptKind::Page,
        }
    }
}

/// Port for generated text.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates text of `kind` from `text`, optionally seeing recent context.
    async fn generate(
        &self,
        kind: PromptKind,
        text: &str,
        context: Option<&str>,
    ) -> Result<String, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_kind_has_a_prompt() {
        for kind in ActionKind::ALL {
            assert_ne!(PromptKind::for_action(kind), PromptKind::Title);
        }
    }
}
