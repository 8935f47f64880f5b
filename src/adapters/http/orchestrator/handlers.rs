//! HTTP handlers for the orchestrator endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{IncomingAttachment, ProcessResponse, SessionRegistry};
use crate::domain::foundation::ConversationId;

use super::dto::{parse_conversation_id, WorkflowRequest};
use super::ApiError;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct OrchestratorAppState {
    pub sessions: Arc<SessionRegistry>,
}

impl OrchestratorAppState {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /agent-workflow - Process one message
pub async fn agent_workflow(
    State(state): State<OrchestratorAppState>,
    Json(req): Json<WorkflowRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let message = req.message()?;
    let conversation_id = parse_conversation_id(req.conversation_id.as_deref())?;

    let response = state.sessions.process(conversation_id, message, None).await;
    Ok(Json(response))
}

/// POST /agent-workflow/upload - Process one message with an optional file
pub async fn agent_workflow_upload(
    State(state): State<OrchestratorAppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut message = None;
    let mut conversation_id = None;
    let mut attachment = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "message" => message = Some(field_text(field).await?),
            "conversation_id" => conversation_id = Some(field_text(field).await?),
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;
                // Browsers send an empty part when no file was picked.
                if !(filename.is_empty() && bytes.is_empty()) {
                    attachment = Some(IncomingAttachment::new(filename, bytes.to_vec()));
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let message =
        message.ok_or_else(|| ApiError::bad_request("Field 'message' is required"))?;
    let conversation_id = parse_conversation_id(conversation_id.as_deref())?;

    let response = state
        .sessions
        .process(conversation_id, &message, attachment)
        .await;
    Ok(Json(response))
}

/// GET /conversations/:id/state - Snapshot of a session
pub async fn conversation_state(
    State(state): State<OrchestratorAppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_path_id(&id)?;
    match state.sessions.state(id).await {
        Some(snapshot) => Ok(Json(snapshot).into_response()),
        None => Err(ApiError::conversation_not_found(&id.to_string())),
    }
}

/// POST /conversations/:id/reset - Clear a session
pub async fn reset_conversation(
    State(state): State<OrchestratorAppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_path_id(&id)?;
    if state.sessions.reset(id).await {
        tracing::info!(conversation_id = %id, "Conversation reset");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::conversation_not_found(&id.to_string()))
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart field: {e}")))
}

fn parse_path_id(raw: &str) -> Result<ConversationId, ApiError> {
    // Ids that cannot exist are reported like unknown ones.
    raw.parse()
        .map_err(|_| ApiError::conversation_not_found(raw))
}
