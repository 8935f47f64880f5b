//! Pending actions and their confirmation lifecycle.

mod confirmation;
mod kind;
mod pending;
mod registry;

pub use confirmation::ConfirmationToken;
pub use kind::ActionKind;
pub use pending::{ActionBody, ActionDraft, AssignmentDraft, PendingAction, StagedAttachment};
pub use registry::{ConfirmationState, PendingActionRegistry, RegistryError};
