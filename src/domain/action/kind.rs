//! Kinds of side-effecting action that need confirmation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminant of a [`PendingAction`](super::PendingAction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Quiz,
    Announcement,
    Assignment,
    Page,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Quiz,
        ActionKind::Announcement,
        ActionKind::Assignment,
        ActionKind::Page,
    ];

    /// Lower-case noun used inside sentences.
    pub fn noun(&self) -> &'static str {
        match self {
            ActionKind::Quiz => "quiz",
            ActionKind::Announcement => "announcement",
            ActionKind::Assignment => "assignment",
            ActionKind::Page => "page",
        }
    }

    /// Capitalised noun used at the start of a sentence.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActionKind::Quiz => "Quiz",
            ActionKind::Announcement => "Announcement",
            ActionKind::Assignment => "Assignment",
            ActionKind::Page => "Page",
        }
    }

    /// Verb describing execution ("create", "post").
    pub fn verb(&self) -> &'static str {
        match self {
            ActionKind::Announcement => "post",
            _ => "create",
        }
    }

    /// Past tense of [`verb`](Self::verb).
    pub fn past_tense(&self) -> &'static str {
        match self {
            ActionKind::Announcement => "posted",
            _ => "created",
        }
    }

    /// Preposition joining the item to its course ("to", "in").
    pub fn preposition(&self) -> &'static str {
        match self {
            ActionKind::Announcement => "to",
            _ => "in",
        }
    }

    /// Title used when none is given and none can be generated.
    pub fn fallback_title(&self) -> &'static str {
        match self {
            ActionKind::Page => "New Page",
            _ => "Generated Content",
        }
    }

    /// Returns true if a bare link can stand in for generated content.
    pub fn accepts_link_only(&self) -> bool {
        matches!(self, ActionKind::Announcement | ActionKind::Page)
    }

    /// Closing question of a staging summary.
    pub fn confirmation_question(&self) -> String {
        format!("Would you like me to {} this {}?", self.verb(), self.noun())
    }

    /// Success line after execution.
    pub fn success_message(&self, title: &str, course: &str) -> String {
        format!(
            "Successfully {} {} '{}' {} {}.",
            self.past_tense(),
            self.noun(),
            title,
            self.preposition(),
            course
        )
    }

    /// Failure line after execution.
    pub fn failure_message(&self, detail: &str) -> String {
        format!("Failed to {} {}: {}", self.verb(), self.noun(), detail)
    }

    /// Line reported when the user cancels.
    pub fn cancelled_message(&self) -> String {
        format!("{} cancelled.", self.display_name())
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_match_kind() {
        assert_eq!(
            ActionKind::Quiz.confirmation_question(),
            "Would you like me to create this quiz?"
        );
        assert_eq!(
            ActionKind::Announcement.confirmation_question(),
            "Would you like me to post this announcement?"
        );
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(
            ActionKind::Quiz.success_message("Recursion", "Intro CS"),
            "Successfully created quiz 'Recursion' in Intro CS."
        );
        assert_eq!(
            ActionKind::Announcement.success_message("Exam", "Bio"),
            "Successfully posted announcement 'Exam' to Bio."
        );
        assert_eq!(
            ActionKind::Quiz.failure_message("HTTP 500"),
            "Failed to create quiz: HTTP 500"
        );
        assert_eq!(
            ActionKind::Announcement.cancelled_message(),
            "Announcement cancelled."
        );
    }

    #[test]
    fn fallback_titles() {
        assert_eq!(ActionKind::Page.fallback_title(), "New Page");
        assert_eq!(ActionKind::Quiz.fallback_title(), "Generated Content");
    }

    #[test]
    fn only_announcements_and_pages_take_bare_links() {
        let kinds: Vec<_> = ActionKind::ALL
            .into_iter()
            .filter(|k| k.accepts_link_only())
            .collect();
        assert_eq!(kinds, vec![ActionKind::Announcement, ActionKind::Page]);
    }
}
