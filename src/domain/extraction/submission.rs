//! Submission-type vocabulary for assignments.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::markers::Marker;

/// How students hand in an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionType {
    OnlineTextEntry,
    OnlineUpload,
    OnlineUrl,
    MediaRecording,
    OnPaper,
}

/// Free-text phrases that imply a submission type without a marker.
const PHRASES: [(&str, SubmissionType); 5] = [
    ("file upload", SubmissionType::OnlineUpload),
    ("website url", SubmissionType::OnlineUrl),
    ("media recording", SubmissionType::MediaRecording),
    ("on paper", SubmissionType::OnPaper),
    ("text entry", SubmissionType::OnlineTextEntry),
];

impl SubmissionType {
    /// Token the course platform expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::OnlineTextEntry => "online_text_entry",
            SubmissionType::OnlineUpload => "online_upload",
            SubmissionType::OnlineUrl => "online_url",
            SubmissionType::MediaRecording => "media_recording",
            SubmissionType::OnPaper => "on_paper",
        }
    }

    /// Maps one vocabulary word or phrase onto a submission type.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let normalized = word.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "text" | "text entry" | "online text entry" => Some(SubmissionType::OnlineTextEntry),
            "file" | "upload" | "file upload" | "online upload" => {
                Some(SubmissionType::OnlineUpload)
            }
            "url" | "website" | "website url" | "online url" => Some(SubmissionType::OnlineUrl),
            "media" | "recording" | "media recording" => Some(SubmissionType::MediaRecording),
            "paper" | "on paper" => Some(SubmissionType::OnPaper),
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Submission types requested by the message.
///
/// A `submission:` marker is read first, comma separated, with each item
/// matched as a phrase and then word by word. Without a marker, known
/// phrases in the free text are used. The result is never empty.
pub fn submission_types(message: &str) -> Vec<SubmissionType> {
    let mut found = Vec::new();
    let mut push = |t: SubmissionType| {
        if !found.contains(&t) {
            found.push(t);
        }
    };

    if let Some(value) = Marker::Submission.line_value(message) {
        for item in value.split(',') {
            match SubmissionType::from_keyword(item) {
                Some(t) => push(t),
                None => item
                    .split_whitespace()
                    .filter_map(SubmissionType::from_keyword)
                    .for_each(&mut push),
            }
        }
    } else {
        let lower = message.to_lowercase();
        PHRASES
            .iter()
            .filter(|(phrase, _)| lower.contains(phrase))
            .for_each(|(_, t)| push(*t));
    }

    if found.is_empty() {
        found.push(SubmissionType::OnlineTextEntry);
    }
    found
}
