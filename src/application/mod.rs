//! Application layer - orchestration of one or many conversations.
//!
//! The [`Orchestrator`] is the entry point of a single conversation; the
//! [`SessionRegistry`] hosts many of them. Everything below talks to the
//! outside world only through the traits in [`crate::ports`].

pub mod actions;
mod attachment;
mod collaborators;
mod confirmation;
mod intent_router;
mod orchestrator;
mod session_registry;
mod settings;

pub use attachment::{AttachmentError, IncomingAttachment, SUPPORTED_EXTENSIONS};
pub use collaborators::{bounded, Collaborators};
pub use confirmation::{ConfirmationController, NOTHING_PENDING};
pub use intent_router::{IntentRouter, Route, RouteSource};
pub use orchestrator::{
    ConversationSnapshot, Orchestrator, ProcessResponse, ATTACHMENT_AGENT, CONFIRMATION_AGENT,
    LAST_ATTACHMENT_KEY,
};
pub use session_registry::SessionRegistry;
pub use settings::OrchestratorSettings;
