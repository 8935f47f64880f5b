//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the orchestration core to external systems:
//! - `ai` - OpenAI-compatible classifier and generator
//! - `canvas` - Canvas LMS course directory and action executor
//! - `storage` - Local attachment store and resource library
//! - `web` - HTTP web researcher
//! - `http` - axum REST API
//! - `mock` - In-memory collaborators for tests

pub mod ai;
pub mod canvas;
pub mod http;
pub mod mock;
pub mod storage;
pub mod web;

mod remote;

pub use ai::{OpenAiAssistant, OpenAiConfig};
pub use canvas::{CanvasClient, CanvasConfig};
pub use storage::{LocalAttachmentStore, LocalResourceLibrary};
pub use web::HttpWebResearcher;
