//! Mock classifier and content generator.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

use super::{Calls, Script};
use crate::ports::{CollaboratorError, ContentGenerator, IntentClassifier, PromptKind};

/// Classifier replying from a script, then `"general"`.
#[derive(Debug, Clone, Default)]
pub struct MockIntentClassifier {
    script: Script<String>,
    calls: Calls<(String, String)>,
    delay: Duration,
}

impl MockIntentClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw classifier reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.push(Ok(reply.into()));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Recorded `(text, context)` pairs.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.all()
    }
}

#[async_trait]
impl IntentClassifier for MockIntentClassifier {
    async fn classify(&self, text: &str, context: &str) -> Result<String, CollaboratorError> {
        self.calls.record((text.to_string(), context.to_string()));
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.script
            .next()
            .unwrap_or_else(|| Ok("general".to_string()))
    }
}

/// One recorded generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCall {
    pub kind: PromptKind,
    pub text: String,
    pub context: Option<String>,
}

/// Generator replying from a script, then a canned reply per kind.
#[derive(Debug, Clone, Default)]
pub struct MockContentGenerator {
    script: Script<String>,
    calls: Calls<GenerateCall>,
    delay: Duration,
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.push(Ok(reply.into()));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls.all()
    }

    fn default_reply(kind: PromptKind, text: &str) -> String {
        match kind {
            PromptKind::Title => "Mock Title".to_string(),
            PromptKind::General => format!("Mock reply to: {text}"),
            PromptKind::WebAnswer => "Mock web answer".to_string(),
            other => format!("Mock {other:?} content about {text}"),
        }
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate(
        &self,
        kind: PromptKind,
        text: &str,
        context: Option<&str>,
    ) -> Result<String, CollaboratorError> {
        self.calls.record(GenerateCall {
            kind,
            text: text.to_string(),
            context: context.map(str::to_string),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.script
            .next()
            .unwrap_or_else(|| Ok(Self::default_reply(kind, text)))
    }
}
