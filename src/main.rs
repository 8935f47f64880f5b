//! Canvas orchestrator server entry point.
//!
//! Loads configuration, installs tracing, wires the adapters into a
//! session registry and serves the HTTP API.

use std::sync::Arc;

use canvas_orchestrator::adapters::http::api_router;
use canvas_orchestrator::adapters::{
    CanvasClient, CanvasConfig, HttpWebResearcher, LocalAttachmentStore, LocalResourceLibrary,
    OpenAiAssistant, OpenAiConfig,
};
use canvas_orchestrator::application::{Collaborators, OrchestratorSettings, SessionRegistry};
use canvas_orchestrator::config::AppConfig;
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).compact().init();
    }
}

fn collaborators(config: &AppConfig) -> Collaborators {
    let ai = &config.ai;
    let assistant = Arc::new(OpenAiAssistant::new(
        OpenAiConfig::new(ai.openai_api_key.clone().unwrap_or_default())
            .with_model(&ai.model)
            .with_base_url(&ai.base_url)
            .with_timeout(ai.timeout()),
    ));
    let canvas = Arc::new(CanvasClient::new(CanvasConfig::new(
        config.canvas.base_url(),
        config.canvas.api_key.clone(),
    )));
    let researcher = Arc::new(HttpWebResearcher::new(assistant.clone(), ai.timeout()));

    Collaborators {
        classifier: assistant.clone(),
        generator: assistant,
        directory: canvas.clone(),
        executor: canvas,
        attachments: Arc::new(LocalAttachmentStore::new(
            &config.storage.attachment_dir,
            config.storage.public_base_url.clone(),
        )),
        researcher,
        library: Arc::new(LocalResourceLibrary::new(&config.storage.resource_dir)),
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let settings = OrchestratorSettings::from(&config.conversation);
    let sessions = Arc::new(SessionRegistry::new(collaborators(&config), settings));
    let app = api_router(
        sessions,
        &config.server,
        settings.max_attachment_bytes,
        &config.storage.attachment_dir,
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Starting canvas orchestrator");

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
