//! Marker grammar for structured fields embedded in free text.
//!
//! A marker is a case-insensitive keyword followed by a colon
//! (`title: Week 3 recap`). Line markers own the rest of their line; the
//! `text:` marker owns everything after it.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::foundation::Timestamp;

/// Points assigned when no points marker parses.
pub const DEFAULT_POINTS: u32 = 100;

/// Hour/minute used when a due date carries no time.
const END_OF_DAY: (u32, u32) = (23, 59);

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("valid regex"));
static SCOPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("valid regex"));
static POINTS_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bpoints:\s*(\d+)").expect("valid regex"));
static POINTS_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d+)\s*(?:points|pts)\b").expect("valid regex"));
static DUE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bdue:\s*(\d{4}-\d{2}-\d{2})(?:[ T](\d{1,2}:\d{2}))?").expect("valid regex")
});
static LINE_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)\b(?:title|points|due|submission|link):[^\n]*").expect("valid regex")
});
static ANY_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(title|points|due|submission|link|text):([^\n]*)").expect("valid regex")
});
static TEXT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btext:").expect("valid regex"));

/// Markers that introduce a structured field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Title,
    Points,
    Due,
    Submission,
    Link,
    Text,
}

impl Marker {
    /// Keyword including the trailing colon.
    pub fn keyword(&self) -> &'static str {
        match self {
            Marker::Title => "title:",
            Marker::Points => "points:",
            Marker::Due => "due:",
            Marker::Submission => "submission:",
            Marker::Link => "link:",
            Marker::Text => "text:",
        }
    }

    /// Value of a line marker: the rest of its line, trimmed.
    ///
    /// Returns `None` when the marker is absent or its value is blank.
    pub fn line_value(&self, message: &str) -> Option<String> {
        let name = self.keyword().trim_end_matches(':');
        let caps = ANY_MARKER
            .captures_iter(message)
            .find(|c| c[1].eq_ignore_ascii_case(name))?;
        let value = caps.get(2)?.as_str().trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Course name inside the first `[...]` pair.
pub fn scope(message: &str) -> Option<String> {
    SCOPE
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Explicit `title:` value.
pub fn title(message: &str) -> Option<String> {
    Marker::Title.line_value(message)
}

/// Points from `points: N` or `N points`, if either parses.
pub fn points_marker(message: &str) -> Option<u32> {
    POINTS_MARKER
        .captures(message)
        .or_else(|| POINTS_SUFFIX.captures(message))
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Points for an assignment, falling back to [`DEFAULT_POINTS`].
pub fn points(message: &str) -> u32 {
    points_marker(message).unwrap_or(DEFAULT_POINTS)
}

/// Due date from `due: YYYY-MM-DD[ HH:MM]`, interpreted as UTC.
///
/// Anything that does not parse yields `None`; a missing due date is not
/// an error.
pub fn due_date(message: &str) -> Option<Timestamp> {
    let caps = DUE_MARKER.captures(message)?;
    let date = NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d").ok()?;
    let time = match caps.get(2) {
        Some(t) => NaiveTime::parse_from_str(t.as_str(), "%H:%M").ok()?,
        None => NaiveTime::from_hms_opt(END_OF_DAY.0, END_OF_DAY.1, 0)?,
    };
    let naive = date.and_time(time);
    Some(Timestamp::from_datetime(Utc.from_utc_datetime(&naive)))
}

/// First `http(s)://` URL, without trailing sentence punctuation.
pub fn first_url(message: &str) -> Option<&str> {
    URL.find(message)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')', '?', '!', ';']))
}

/// Link payload: the `link:` value, otherwise the first bare URL.
///
/// A `link:` value written without a scheme gets `https://`.
pub fn link(message: &str) -> Option<String> {
    match Marker::Link.line_value(message) {
        Some(value) => Some(with_scheme(&value)),
        None => first_url(message).map(str::to_string),
    }
}

fn with_scheme(value: &str) -> String {
    let lower = value.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        value.to_string()
    } else {
        format!("https://{}", value.trim_start_matches('/'))
    }
}

/// Everything after `text:`, verbatim.
pub fn verbatim_text(message: &str) -> Option<String> {
    let m = TEXT_MARKER.find(message)?;
    let value = message[m.end()..].trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Returns true if the message carries a literal answer key.
pub fn has_answer_key(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("answer key:") || lower.contains("correct answer:")
}

/// Free-text body: scope brackets, line markers and any `text:` tail removed.
///
/// Line structure is kept; blank lines are dropped and runs of spaces
/// collapse to one.
pub fn body(message: &str) -> String {
    let without_text = match TEXT_MARKER.find(message) {
        Some(m) => &message[..m.start()],
        None => message,
    };
    let without_scope = SCOPE.replace(without_text, " ");
    let without_markers = LINE_MARKERS.replace_all(&without_scope, "");

    without_markers
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Words that only express the command, not content.
const COMMAND_WORDS: [&str; 17] = [
    "post", "announce", "announcement", "create", "make", "a", "an", "the", "page", "as", "new",
    "link", "share", "this", "quiz", "assignment", "please",
];

/// Returns true if `text` holds nothing but command words and punctuation.
pub fn is_command_only(text: &str) -> bool {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .all(|w| COMMAND_WORDS.contains(&w.as_str()))
}

/// Returns true if `link` is the only content of the message.
pub fn is_link_only(message: &str, link: &str) -> bool {
    is_command_only(&body(message).replace(link, " "))
}

/// Splits a web request into its first URL and the remaining question.
pub fn url_and_question(message: &str) -> (Option<String>, Option<String>) {
    let url = first_url(message).map(str::to_string);
    let question = URL.replace_all(message, " ");
    let question = question.split_whitespace().collect::<Vec<_>>().join(" ");
    let question = (!question.is_empty()).then_some(question);
    (url, question)
}
