//! HTTP adapters - REST API implementations.

pub mod orchestrator;

use std::path::Path;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::SessionRegistry;
use crate::config::ServerConfig;

pub use orchestrator::{admin_routes, workflow_routes, ApiError, OrchestratorAppState};

/// Path under which stored attachments are served.
pub const FILES_PATH: &str = "/files";

/// Full API router with tracing and CORS layers.
///
/// The request timeout covers the admin routes only. A conversation turn
/// is bounded by the per-call collaborator timeout and always ends in a
/// logged reply, so it is not cut off at the HTTP layer.
pub fn api_router(
    sessions: Arc<SessionRegistry>,
    server: &ServerConfig,
    max_attachment_bytes: usize,
    attachment_dir: impl AsRef<Path>,
) -> Router {
    let state = OrchestratorAppState::new(sessions);

    workflow_routes(state.clone(), max_attachment_bytes)
        .merge(admin_routes(state).layer(TimeoutLayer::new(server.request_timeout())))
        .nest_service(FILES_PATH, ServeDir::new(attachment_dir.as_ref()))
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TraceLayer::new_for_http())
}

/// Any origin when the list is empty, otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
