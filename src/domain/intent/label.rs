//! The closed set of intents a message can be routed to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::action::ActionKind;

/// Classified category of a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    /// Answer a question from a URL or the web.
    WebSearch,
    /// Post an announcement to a course.
    Post,
    /// List courses or library resources.
    List,
    /// Create a quiz.
    Quiz,
    /// Create an assignment.
    Assignment,
    /// Create a course page.
    Page,
    /// Free-form assistant reply.
    General,
}

impl IntentLabel {
    /// Every label, in routing-priority order of their pre-filter rules.
    pub const ALL: [IntentLabel; 7] = [
        IntentLabel::Page,
        IntentLabel::Assignment,
        IntentLabel::Quiz,
        IntentLabel::List,
        IntentLabel::WebSearch,
        IntentLabel::Post,
        IntentLabel::General,
    ];

    /// Wire name of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentLabel::WebSearch => "web_search",
            IntentLabel::Post => "post",
            IntentLabel::List => "list",
            IntentLabel::Quiz => "quiz",
            IntentLabel::Assignment => "assignment",
            IntentLabel::Page => "page",
            IntentLabel::General => "general",
        }
    }

    /// Name of the agent reported to clients for this intent.
    pub fn agent_name(&self) -> &'static str {
        match self {
            IntentLabel::WebSearch => "web_search",
            IntentLabel::Post => "canvas_post",
            IntentLabel::List => "listing",
            IntentLabel::Quiz => "canvas_quiz",
            IntentLabel::Assignment => "canvas_assignment",
            IntentLabel::Page => "canvas_page",
            IntentLabel::General => "general",
        }
    }

    /// Kind of pending action this intent stages, if any.
    pub fn action_kind(&self) -> Option<ActionKind> {
        match self {
            IntentLabel::Post => Some(ActionKind::Announcement),
            IntentLabel::Quiz => Some(ActionKind::Quiz),
            IntentLabel::Assignment => Some(ActionKind::Assignment),
            IntentLabel::Page => Some(ActionKind::Page),
            IntentLabel::WebSearch | IntentLabel::List | IntentLabel::General => None,
        }
    }

    /// Returns true if the intent needs a bracketed course scope.
    pub fn is_scope_bound(&self) -> bool {
        self.action_kind().is_some()
    }

    /// Maps a free-text classifier reply onto the label set.
    ///
    /// The reply is trusted verbatim once normalised; anything outside the
    /// vocabulary becomes [`IntentLabel::General`].
    pub fn from_classifier_reply(reply: &str) -> Self {
        let normalized = reply
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.' || c == '!')
            .trim()
            .to_lowercase();

        match normalized.as_str() {
            "web_search" | "web search" | "websearch" => IntentLabel::WebSearch,
            "post" | "announce" | "announcement" => IntentLabel::Post,
            "list" => IntentLabel::List,
            "quiz" => IntentLabel::Quiz,
            "assignment" => IntentLabel::Assignment,
            "page" => IntentLabel::Page,
            _ => IntentLabel::General,
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
