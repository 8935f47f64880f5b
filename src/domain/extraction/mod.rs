//! Parameter extraction from free-text requests.
//!
//! Every function here is pure: it reads a message and returns the field
//! it found, or a documented default.

mod markers;
mod submission;

pub use markers::{
    body, due_date, first_url, has_answer_key, is_command_only, is_link_only, link, points,
    points_marker, scope, title, url_and_question, verbatim_text, Marker, DEFAULT_POINTS,
};
pub use submission::{submission_types, SubmissionType};
