//! Action Executor Port - performs a confirmed action on the course platform.

use async_trait::async_trait;
use serde::Serialize;

use super::CollaboratorError;
use crate::domain::action::{ActionBody, ActionKind, PendingAction};
use crate::domain::extraction::SubmissionType;
use crate::domain::foundation::{CourseId, Timestamp};

/// Assignment-only execution parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentParams {
    pub points: u32,
    pub due_at: Option<Timestamp>,
    pub submission_types: Vec<SubmissionType>,
}

/// Fully resolved payload of a confirmed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionRequest {
    pub kind: ActionKind,
    pub course_id: CourseId,
    pub course_name: String,
    pub title: String,
    pub body: ActionBody,
    /// Public URL of an uploaded attachment, if the action carried one.
    pub attachment_url: Option<String>,
    pub assignment: Option<AssignmentParams>,
}

impl ExecutionRequest {
    /// Builds the request for a staged action once its course is resolved.
    pub fn from_pending(
        action: &PendingAction,
        course_id: CourseId,
        attachment_url: Option<String>,
    ) -> Self {
        let draft = action.draft();
        let assignment = match action {
            PendingAction::Assignment(a) => Some(AssignmentParams {
                points: a.points,
                due_at: a.due_at,
                submission_types: a.submission_types.clone(),
            }),
            _ => None,
        };

        Self {
            kind: action.kind(),
            course_id,
            course_name: draft.course_name.clone(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            attachment_url,
            assignment,
        }
    }
}

/// Result reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub detail: String,
}

impl ExecutionOutcome {
    pub fn succeeded(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionOutcome, CollaboratorError>;
}
