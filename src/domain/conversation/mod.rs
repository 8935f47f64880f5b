//! Conversation domain module.
//!
//! Holds the append-only message log of a session and the bounded
//! context window derived from it.

mod context;
mod message;
mod store;

pub use context::{RecentContext, DEFAULT_CONTEXT_WINDOW};
pub use message::{Message, Role};
pub use store::{ConversationState, ConversationStore};
