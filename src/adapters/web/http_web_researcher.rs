//! Web researcher that reads a page and asks the content generator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::adapters::remote::{
    client_with_timeout, ensure_success, read_text_capped, transport_error, truncate,
};
use crate::ports::{CollaboratorError, ContentGenerator, PromptKind, WebResearcher};

/// Characters of page text passed to the generator.
pub const MAX_PAGE_CHARS: usize = 4000;

/// Raw bytes read from a page before markup is stripped.
pub const MAX_FETCH_BYTES: usize = 512 * 1024;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; canvas-orchestrator/0.1)";

static HIDDEN_BLOCKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style|nav|footer|header|aside|noscript)\b[^>]*>.*?</(script|style|nav|footer|header|aside|noscript)>")
        .expect("valid regex")
});
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Fetches pages over HTTP and delegates answering to a [`ContentGenerator`].
pub struct HttpWebResearcher {
    http_client: Client,
    generator: Arc<dyn ContentGenerator>,
    timeout: Duration,
}

impl HttpWebResearcher {
    pub fn new(generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self {
            http_client: client_with_timeout(timeout),
            generator,
            timeout,
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, CollaboratorError> {
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        let html = read_text_capped(ensure_success(response).await?, MAX_FETCH_BYTES).await?;

        Ok(truncate(&strip_markup(&html), MAX_PAGE_CHARS))
    }
}

#[async_trait]
impl WebResearcher for HttpWebResearcher {
    async fn answer(&self, url: Option<&str>, question: &str) -> Result<String, CollaboratorError> {
        let prompt = match url {
            Some(url) => {
                let text = self.fetch_text(url).await?;
                tracing::info!(url, chars = text.chars().count(), "Fetched page for question");
                format!("Content from {url}:\n{text}\n\nQuestion: {question}")
            }
            None => question.to_string(),
        };

        self.generator.generate(PromptKind::WebAnswer, &prompt, None).await
    }
}

/// Removes non-content blocks and tags, decodes common entities and
/// collapses whitespace.
pub fn strip_markup(html: &str) -> String {
    let without_blocks = HIDDEN_BLOCKS.replace_all(html, " ");
    let text = TAGS.replace_all(&without_blocks, " ");
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}
