//! Staging steps shared by the scope-bound handlers.

use std::sync::Arc;
use std::time::Duration;

use super::{HandlerError, HandlerRequest};
use crate::application::collaborators::bounded;
use crate::domain::action::{ActionBody, ActionDraft, ActionKind};
use crate::domain::extraction;
use crate::ports::{CollaboratorError, ContentGenerator, PromptKind};

/// Title used for link-only payloads.
pub(super) const LINK_TITLE: &str = "External Resource";

/// Longest generated title, in words.
const MAX_TITLE_WORDS: usize = 7;

/// Resolved body plus the text a title should summarise.
struct Content {
    body: ActionBody,
    title_source: Option<String>,
}

/// Scope, pending check, content and title resolution for one kind.
pub(super) struct Stager {
    kind: ActionKind,
    generator: Arc<dyn ContentGenerator>,
    timeout: Duration,
}

impl Stager {
    pub(super) fn new(kind: ActionKind, generator: Arc<dyn ContentGenerator>, timeout: Duration) -> Self {
        Self {
            kind,
            generator,
            timeout,
        }
    }

    /// Builds the shared draft, or the user-visible reason it cannot be built.
    pub(super) async fn draft(&self, request: &HandlerRequest<'_>) -> Result<ActionDraft, HandlerError> {
        let course = extraction::scope(request.message).ok_or(HandlerError::MissingScope)?;
        if let Some(pending) = request.pending {
            return Err(HandlerError::AlreadyPending { pending });
        }

        let content = self.content(request).await?;
        let title = match extraction::title(request.message) {
            Some(explicit) => explicit,
            None => self.title(content.title_source.as_deref()).await,
        };

        Ok(ActionDraft::new(course, title, content.body)
            .with_attachment(request.attachment.cloned()))
    }

    async fn content(&self, request: &HandlerRequest<'_>) -> Result<Content, HandlerError> {
        let message = request.message;

        if self.kind.accepts_link_only() {
            if let Some(link) = extraction::link(message) {
                if extraction::is_link_only(message, &link) {
                    return Ok(Content {
                        body: ActionBody::Link(link),
                        title_source: None,
                    });
                }
            }
        }

        if let Some(text) = extraction::verbatim_text(message) {
            return Ok(Content {
                body: ActionBody::Text(text.clone()),
                title_source: Some(text),
            });
        }

        let body = extraction::body(message);
        let has_body = !extraction::is_command_only(&body);

        if self.kind == ActionKind::Quiz && has_body && extraction::has_answer_key(message) {
            return Ok(Content {
                body: ActionBody::Text(body.clone()),
                title_source: Some(body),
            });
        }

        if !has_body {
            return match request.attachment {
                Some(file) => {
                    let text = format!("Please see the attached file: {}", file.filename);
                    Ok(Content {
                        body: ActionBody::Text(text.clone()),
                        title_source: Some(text),
                    })
                }
                None => Err(HandlerError::MissingContent { kind: self.kind }),
            };
        }

        let generated = bounded(
            self.timeout,
            self.generator
                .generate(PromptKind::for_action(self.kind), &body, request.context()),
        )
        .await
        .and_then(|text| {
            let text = text.trim().to_string();
            if text.is_empty() {
                Err(CollaboratorError::InvalidResponse("empty content".into()))
            } else {
                Ok(text)
            }
        })
        .map_err(|source| HandlerError::Generation {
            kind: self.kind,
            source,
        })?;

        Ok(Content {
            body: ActionBody::Text(generated),
            title_source: Some(body),
        })
    }

    async fn title(&self, source: Option<&str>) -> String {
        let Some(source) = source else {
            return LINK_TITLE.to_string();
        };

        match bounded(self.timeout, self.generator.generate(PromptKind::Title, source, None)).await {
            Ok(raw) => bound_title(&raw).unwrap_or_else(|| {
                tracing::warn!(kind = %self.kind, "Generated title was empty, using fallback");
                self.kind.fallback_title().to_string()
            }),
            Err(err) => {
                tracing::warn!(kind = %self.kind, error = %err, "Title generation failed, using fallback");
                self.kind.fallback_title().to_string()
            }
        }
    }
}

/// Cleans a generated title: first line, no quotes or `Title:` prefix, at
/// most [`MAX_TITLE_WORDS`] words.
pub(super) fn bound_title(raw: &str) -> Option<String> {
    let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = match line.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("title:") => &line[6..],
        _ => line,
    };
    let cleaned = line.trim_matches(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '*' | '#'));

    let words: Vec<_> = cleaned.split_whitespace().take(MAX_TITLE_WORDS).collect();
    (!words.is_empty()).then(|| words.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockContentGenerator;
    use crate::domain::action::StagedAttachment;

    fn stager(kind: ActionKind, generator: &MockContentGenerator) -> Stager {
        Stager::new(kind, Arc::new(generator.clone()), Duration::from_secs(5))
    }

    mod titles {
        use super::*;

        #[test]
        fn strips_quotes_and_prefix() {
            assert_eq!(bound_title("  \"Recursion Basics\"\n").as_deref(), Some("Recursion Basics"));
            assert_eq!(bound_title("Title: Lab Safety").as_deref(), Some("Lab Safety"));
        }

        #[test]
        fn bounds_word_count() {
            let long = "one two three four five six seven eight nine";
            assert_eq!(
                bound_title(long).as_deref(),
                Some("one two three four five six seven")
            );
        }

        #[test]
        fn blank_is_none() {
            assert_eq!(bound_title("  \n\"\""), None);
        }

        #[tokio::test]
        async fn explicit_title_skips_generation() {
            let generator = MockContentGenerator::new();
            let draft = stager(ActionKind::Announcement, &generator)
                .draft(&HandlerRequest::new("post [Bio] title: Lab moved\nLab is on Friday", ""))
                .await
                .unwrap();

            assert_eq!(draft.title, "Lab moved");
            assert_eq!(generator.call_count(), 1);
            assert_eq!(generator.calls()[0].kind, PromptKind::Announcement);
        }

        #[tokio::test]
        async fn title_failure_uses_kind_fallback() {
            let generator = MockContentGenerator::new()
                .with_reply("Page body")
                .with_error(CollaboratorError::Network("reset".into()));

            let draft = stager(ActionKind::Page, &generator)
                .draft(&HandlerRequest::new("create a page [Bio] about mitosis", ""))
                .await
                .unwrap();

            assert_eq!(draft.title, "New Page");
        }
    }

    mod content {
        use super::*;

        #[tokio::test]
        async fn missing_scope_is_checked_first() {
            let generator = MockContentGenerator::new();
            let request = HandlerRequest::new("post something", "")
                .with_pending(Some(ActionKind::Quiz));

            let err = stager(ActionKind::Announcement, &generator)
                .draft(&request)
                .await
                .unwrap_err();

            assert_eq!(err, HandlerError::MissingScope);
            assert_eq!(generator.call_count(), 0);
        }

        #[tokio::test]
        async fn pending_action_blocks_staging() {
            let generator = MockContentGenerator::new();
            let request = HandlerRequest::new("post [Bio] exam on friday", "")
                .with_pending(Some(ActionKind::Announcement));

            let err = stager(ActionKind::Announcement, &generator)
                .draft(&request)
                .await
                .unwrap_err();

            assert_eq!(err, HandlerError::AlreadyPending { pending: ActionKind::Announcement });
            assert_eq!(generator.call_count(), 0);
        }

        #[tokio::test]
        async fn link_only_skips_generation() {
            let generator = MockContentGenerator::new();
            let draft = stager(ActionKind::Page, &generator)
                .draft(&HandlerRequest::new("as a page [Bio] https://example.com/reading", ""))
                .await
                .unwrap();

            assert_eq!(draft.body, ActionBody::Link("https://example.com/reading".into()));
            assert_eq!(draft.title, LINK_TITLE);
            assert_eq!(generator.call_count(), 0);
        }

        #[tokio::test]
        async fn verbatim_text_is_kept() {
            let generator = MockContentGenerator::new().with_reply("Welcome");
            let draft = stager(ActionKind::Page, &generator)
                .draft(&HandlerRequest::new("as a page [Bio] text: Hello\nclass", ""))
                .await
                .unwrap();

            assert_eq!(draft.body, ActionBody::Text("Hello\nclass".into()));
            assert_eq!(draft.title, "Welcome");
            assert_eq!(generator.calls()[0].kind, PromptKind::Title);
        }

        #[tokio::test]
        async fn answer_key_quiz_is_taken_verbatim() {
            let generator = MockContentGenerator::new();
            let msg = "[Intro CS] Q1: 2+2?\nCorrect answer: 4";
            let draft = stager(ActionKind::Quiz, &generator)
                .draft(&HandlerRequest::new(msg, ""))
                .await
                .unwrap();

            assert_eq!(draft.body, ActionBody::Text("Q1: 2+2?\nCorrect answer: 4".into()));
            assert!(generator.calls().iter().all(|c| c.kind == PromptKind::Title));
        }

        #[tokio::test]
        async fn empty_body_asks_for_description() {
            let generator = MockContentGenerator::new();
            let err = stager(ActionKind::Quiz, &generator)
                .draft(&HandlerRequest::new("create a quiz [Intro CS]", ""))
                .await
                .unwrap_err();

            assert_eq!(err, HandlerError::MissingContent { kind: ActionKind::Quiz });
        }

        #[tokio::test]
        async fn attachment_stands_in_for_empty_body() {
            let generator = MockContentGenerator::new();
            let file = StagedAttachment::new("notes.pdf", vec![1, 2]);
            let request = HandlerRequest::new("post [Bio]", "").with_attachment(Some(&file));

            let draft = stager(ActionKind::Announcement, &generator)
                .draft(&request)
                .await
                .unwrap();

            assert!(draft.body.as_str().contains("notes.pdf"));
            assert_eq!(draft.attachment.map(|a| a.filename), Some("notes.pdf".to_string()));
        }

        #[tokio::test]
        async fn generation_failure_aborts() {
            let generator =
                MockContentGenerator::new().with_error(CollaboratorError::Unavailable("off".into()));

            let err = stager(ActionKind::Quiz, &generator)
                .draft(&HandlerRequest::new("quiz [CS] about loops", ""))
                .await
                .unwrap_err();

            assert!(matches!(err, HandlerError::Generation { kind: ActionKind::Quiz, .. }));
        }

        #[tokio::test]
        async fn context_is_forwarded_to_generation() {
            let generator = MockContentGenerator::new();
            stager(ActionKind::Quiz, &generator)
                .draft(&HandlerRequest::new("quiz [CS] about loops", "User: hi"))
                .await
                .unwrap();

            assert_eq!(generator.calls()[0].context.as_deref(), Some("User: hi"));
        }
    }
}
