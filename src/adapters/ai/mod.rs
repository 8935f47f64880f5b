//! AI Adapters.
//!
//! - `OpenAiAssistant` - OpenAI-compatible chat client serving as both the
//!   intent classifier and the content generator

mod openai_assistant;

pub use openai_assistant::{OpenAiAssistant, OpenAiConfig};
