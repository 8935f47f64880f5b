//! Deterministic pre-filter applied before the external classifier.
//!
//! Several textual cues can co-occur in one message ("post this link as a
//! page"), so the rules form an ordered table and the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

use super::IntentLabel;
use crate::domain::extraction;

static ASSIGNMENT_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bassignments?\b").expect("valid regex"));
static QUIZ_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bquiz(zes)?\b").expect("valid regex"));
static POST_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(post|announce|announcement)\b").expect("valid regex"));

const PAGE_MARKERS: [&str; 4] = ["as a page", "create a page", "create page", "new page"];
const LISTING_MARKERS: [&str; 7] = [
    "list courses",
    "show courses",
    "my courses",
    "show pdfs",
    "list pdfs",
    "list resources",
    "show resources",
];

/// One row of the pre-filter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreFilterRule {
    PageMarker,
    AssignmentMarker,
    QuizMarker,
    ListingMarker,
    Url,
    PostMarker,
}

impl PreFilterRule {
    /// The table, highest priority first.
    pub const PRIORITY: [PreFilterRule; 6] = [
        PreFilterRule::PageMarker,
        PreFilterRule::AssignmentMarker,
        PreFilterRule::QuizMarker,
        PreFilterRule::ListingMarker,
        PreFilterRule::Url,
        PreFilterRule::PostMarker,
    ];

    /// Label assigned when this rule matches.
    pub fn label(&self) -> IntentLabel {
        match self {
            PreFilterRule::PageMarker => IntentLabel::Page,
            PreFilterRule::AssignmentMarker => IntentLabel::Assignment,
            PreFilterRule::QuizMarker => IntentLabel::Quiz,
            PreFilterRule::ListingMarker => IntentLabel::List,
            PreFilterRule::Url => IntentLabel::WebSearch,
            PreFilterRule::PostMarker => IntentLabel::Post,
        }
    }

    /// Returns true if the rule fires for `message`.
    pub fn matches(&self, message: &str) -> bool {
        let lower = message.to_lowercase();
        match self {
            PreFilterRule::PageMarker => PAGE_MARKERS.iter().any(|m| lower.contains(m)),
            PreFilterRule::AssignmentMarker => ASSIGNMENT_WORD.is_match(message),
            PreFilterRule::QuizMarker => {
                QUIZ_WORD.is_match(message) || extraction::has_answer_key(message)
            }
            PreFilterRule::ListingMarker => LISTING_MARKERS.iter().any(|m| lower.contains(m)),
            PreFilterRule::Url => extraction::first_url(message).is_some(),
            PreFilterRule::PostMarker => POST_WORD.is_match(message),
        }
    }
}

/// Returns the first rule (in priority order) that matches `message`.
pub fn pre_filter(message: &str) -> Option<PreFilterRule> {
    PreFilterRule::PRIORITY
        .iter()
        .copied()
        .find(|rule| rule.matches(message))
}
