//! HTTP routes for the orchestrator endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{
    agent_workflow, agent_workflow_upload, conversation_state, health, reset_conversation,
    OrchestratorAppState,
};

/// Multipart overhead allowed on top of the attachment limit.
const MULTIPART_SLACK_BYTES: usize = 1024 * 1024;

/// Routes that run a conversation turn.
///
/// The upload route accepts bodies somewhat larger than
/// `max_attachment_bytes` so oversize files reach the orchestrator and get
/// a conversational rejection instead of a bare 413.
pub fn workflow_routes(state: OrchestratorAppState, max_attachment_bytes: usize) -> Router {
    let upload_limit = max_attachment_bytes
        .saturating_mul(2)
        .saturating_add(MULTIPART_SLACK_BYTES);

    Router::new()
        .route("/agent-workflow", post(agent_workflow))
        .route(
            "/agent-workflow/upload",
            post(agent_workflow_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

/// Session inspection, reset and health routes.
pub fn admin_routes(state: OrchestratorAppState) -> Router {
    Router::new()
        .route("/conversations/:id/state", get(conversation_state))
        .route("/conversations/:id/reset", post(reset_conversation))
        .route("/health", get(health))
        .with_state(state)
}
