//! OpenAI-compatible chat client serving as classifier and generator.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let assistant = Arc::new(OpenAiAssistant::new(config));
//! ```
//!
//! One short system prompt per [`PromptKind`]; the recent conversation, if
//! any, is prepended to the user turn.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::adapters::remote::{client_with_timeout, ensure_success, transport_error};
use crate::ports::{CollaboratorError, ContentGenerator, IntentClassifier, PromptKind};

const CLASSIFIER_PROMPT: &str = "You route requests from a course instructor. Reply with exactly \
one label and nothing else: web_search, post, list, quiz, assignment, page or general.";

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL; a trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions client implementing both assistant ports.
pub struct OpenAiAssistant {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiAssistant {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = client_with_timeout(config.timeout);
        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn system_prompt(kind: PromptKind) -> &'static str {
        match kind {
            PromptKind::Title => {
                "Write a short title (at most seven words) for the following text. \
                 Reply with the title only."
            }
            PromptKind::Announcement => {
                "Write a clear, friendly course announcement from the instructor's request."
            }
            PromptKind::Quiz => {
                "Write a multiple-choice quiz from the instructor's request. Number the \
                 questions and mark each correct answer."
            }
            PromptKind::Assignment => {
                "Write assignment instructions from the instructor's request, including \
                 objectives and deliverables."
            }
            PromptKind::Page => {
                "Write the content of a course page from the instructor's request."
            }
            PromptKind::General => "You are a helpful teaching assistant. Answer concisely.",
            PromptKind::WebAnswer => {
                "Answer the question using only the provided web content. Say so if the \
                 content does not contain the answer."
            }
        }
    }

    fn user_turn(text: &str, context: Option<&str>) -> String {
        match context {
            Some(ctx) if !ctx.is_empty() => {
                format!("Recent conversation:\n{ctx}\n\nRequest:\n{text}")
            }
            _ => text.to_string(),
        }
    }

    fn build_request(&self, system: &str, user: String) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: Some(0.3),
        }
    }

    async fn complete(&self, request: ChatRequest) -> Result<String, CollaboratorError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout))?;

        let response = ensure_success(response).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        body.into_content()
    }
}

#[async_trait]
impl IntentClassifier for OpenAiAssistant {
    async fn classify(&self, text: &str, context: &str) -> Result<String, CollaboratorError> {
        let context = (!context.is_empty()).then_some(context);
        let request = self.build_request(CLASSIFIER_PROMPT, Self::user_turn(text, context));
        self.complete(request).await
    }
}

#[async_trait]
impl ContentGenerator for OpenAiAssistant {
    async fn generate(
        &self,
        kind: PromptKind,
        text: &str,
        context: Option<&str>,
    ) -> Result<String, CollaboratorError> {
        let request = self.build_request(Self::system_prompt(kind), Self::user_turn(text, context));
        self.complete(request).await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatResponse {
    fn into_content(self) -> Result<String, CollaboratorError> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| CollaboratorError::InvalidResponse("No choices in response".into()))
    }
}
