//! Canvas LMS adapter.

mod client;

pub use client::{CanvasClient, CanvasConfig};
