//! Staged actions awaiting confirmation.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::ActionKind;
use crate::domain::extraction::SubmissionType;
use crate::domain::foundation::Timestamp;

/// Payload that becomes the body of the created item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ActionBody {
    /// Generated or verbatim text.
    Text(String),
    /// A single external link standing in for content.
    Link(String),
}

impl ActionBody {
    pub fn as_str(&self) -> &str {
        match self {
            ActionBody::Text(s) | ActionBody::Link(s) => s,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, ActionBody::Link(_))
    }
}

/// File that rides along with a staged action.
///
/// The bytes stay in memory until confirmation and are never serialized.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedAttachment {
    pub filename: String,
    pub size_bytes: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl StagedAttachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            size_bytes: bytes.len(),
            bytes,
        }
    }
}

impl std::fmt::Debug for StagedAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagedAttachment")
            .field("filename", &self.filename)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// Fields shared by every action kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDraft {
    /// Course name as written by the user, resolved only on confirmation.
    pub course_name: String,
    pub title: String,
    pub body: ActionBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<StagedAttachment>,
    pub staged_at: Timestamp,
}

impl ActionDraft {
    pub fn new(course_name: impl Into<String>, title: impl Into<String>, body: ActionBody) -> Self {
        Self {
            course_name: course_name.into(),
            title: title.into(),
            body,
            attachment: None,
            staged_at: Timestamp::now(),
        }
    }

    pub fn with_attachment(mut self, attachment: Option<StagedAttachment>) -> Self {
        self.attachment = attachment;
        self
    }
}

/// Assignment-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    #[serde(flatten)]
    pub draft: ActionDraft,
    pub points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<Timestamp>,
    pub submission_types: Vec<SubmissionType>,
}

/// A staged, not-yet-executed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingAction {
    Quiz(ActionDraft),
    Announcement(ActionDraft),
    Assignment(AssignmentDraft),
    Page(ActionDraft),
}

impl PendingAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PendingAction::Quiz(_) => ActionKind::Quiz,
            PendingAction::Announcement(_) => ActionKind::Announcement,
            PendingAction::Assignment(_) => ActionKind::Assignment,
            PendingAction::Page(_) => ActionKind::Page,
        }
    }

    /// Shared fields of the staged action.
    pub fn draft(&self) -> &ActionDraft {
        match self {
            PendingAction::Quiz(d) | PendingAction::Announcement(d) | PendingAction::Page(d) => d,
            PendingAction::Assignment(a) => &a.draft,
        }
    }

    pub fn course_name(&self) -> &str {
        &self.draft().course_name
    }

    pub fn title(&self) -> &str {
        &self.draft().title
    }

    pub fn attachment(&self) -> Option<&StagedAttachment> {
        self.draft().attachment.as_ref()
    }

    /// Human-readable summary listing every resolved field, ending with the
    /// confirmation question and the yes/no instruction.
    pub fn summary(&self) -> String {
        let kind = self.kind();
        let draft = self.draft();
        let mut out = format!(
            "I've prepared the following {} for {}:\n\nTitle: {}\n",
            kind.noun(),
            draft.course_name,
            draft.title
        );

        // fmt::Write into a String cannot fail.
        let _ = match &draft.body {
            ActionBody::Link(url) => writeln!(out, "Link: {url}"),
            ActionBody::Text(text) => writeln!(out, "Content:\n{text}"),
        };

        if let PendingAction::Assignment(a) = self {
            let _ = writeln!(out, "Points: {}", a.points);
            let due = a
                .due_at
                .map(|d| d.to_rfc3339())
                .unwrap_or_else(|| "none".to_string());
            let _ = writeln!(out, "Due: {due}");
            let types: Vec<_> = a.submission_types.iter().map(|t| t.as_str()).collect();
            let _ = writeln!(out, "Submission types: {}", types.join(", "));
        }

        if let Some(file) = &draft.attachment {
            let _ = writeln!(out, "Attachment: {} ({} bytes)", file.filename, file.size_bytes);
        }

        let _ = write!(
            out,
            "\n{} Reply \"yes\" to confirm or \"no\" to cancel.",
            kind.confirmation_question()
        );
        out
    }
}
