//! HTTP adapter for the conversational orchestrator.

mod dto;
mod handlers;
mod routes;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{DomainError, ErrorCode};

pub use dto::{parse_conversation_id, ErrorResponse, WorkflowRequest};
pub use handlers::OrchestratorAppState;
pub use routes::{admin_routes, workflow_routes};

/// Domain error surfaced as an HTTP status. Conversational failures never
/// get here; they are ordinary 200 replies.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(DomainError::new(ErrorCode::ValidationFailed, message))
    }

    pub fn conversation_not_found(id: &str) -> Self {
        Self(
            DomainError::new(ErrorCode::ConversationNotFound, "Conversation not found")
                .with_detail("conversation_id", id),
        )
    }

    pub fn code(&self) -> ErrorCode {
        self.0.code()
    }

    fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::ConversationNotFound | ErrorCode::CourseNotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let DomainError {
            code,
            message,
            details,
        } = self.0;
        let body = ErrorResponse {
            code: code.to_string(),
            message,
            details: (!details.is_empty()).then_some(details),
        };
        (status, Json(body)).into_response()
    }
}
