//! Single-slot registry enforcing at most one pending action.

use serde::Serialize;
use thiserror::Error;

use super::{ActionKind, PendingAction};
use crate::domain::foundation::{StateMachine, ValidationError};

/// Confirmation lifecycle of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "kind", rename_all = "snake_case")]
pub enum ConfirmationState {
    Empty,
    Pending(ActionKind),
}

impl StateMachine for ConfirmationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConfirmationState::*;
        matches!(
            (self, target),
            (Empty, Pending(_)) | (Pending(_), Empty) | (Empty, Empty)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("a {pending} is already awaiting confirmation")]
    AlreadyPending { pending: ActionKind },

    #[error(transparent)]
    Transition(#[from] ValidationError),
}

/// Holds the one in-flight action of a conversation.
#[derive(Debug, Clone, Default)]
pub struct PendingActionRegistry {
    slot: Option<PendingAction>,
}

impl PendingActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConfirmationState {
        match &self.slot {
            Some(action) => ConfirmationState::Pending(action.kind()),
            None => ConfirmationState::Empty,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn peek(&self) -> Option<&PendingAction> {
        self.slot.as_ref()
    }

    /// Stages `action`; refused while another action is pending.
    pub fn stage(&mut self, action: PendingAction) -> Result<(), RegistryError> {
        let current = self.state();
        if let Err(err) = current.transition_to(ConfirmationState::Pending(action.kind())) {
            return Err(match current {
                ConfirmationState::Pending(pending) => RegistryError::AlreadyPending { pending },
                ConfirmationState::Empty => RegistryError::Transition(err),
            });
        }
        self.slot = Some(action);
        Ok(())
    }

    /// Removes and returns the pending action, leaving the registry empty.
    pub fn take(&mut self) -> Option<PendingAction> {
        self.slot.take()
    }

    /// Discards the pending action, if any.
    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::{ActionBody, ActionDraft};

    fn announcement() -> PendingAction {
        PendingAction::Announcement(ActionDraft::new("Bio", "Exam", ActionBody::Text("Friday".into())))
    }

    fn quiz() -> PendingAction {
        PendingAction::Quiz(ActionDraft::new("Bio", "Cells", ActionBody::Text("Q1".into())))
    }

    mod state_machine {
        use super::*;

        #[test]
        fn empty_can_stage_any_kind() {
            for kind in ActionKind::ALL {
                assert!(ConfirmationState::Empty.can_transition_to(&ConfirmationState::Pending(kind)));
            }
        }

        #[test]
        fn pending_only_returns_to_empty() {
            let pending = ConfirmationState::Pending(ActionKind::Quiz);
            assert_eq!(pending.transition_to(ConfirmationState::Empty), Ok(ConfirmationState::Empty));
            for kind in ActionKind::ALL {
                assert!(pending.transition_to(ConfirmationState::Pending(kind)).is_err());
            }
        }
    }

    mod registry {
        use super::*;

        #[test]
        fn stage_then_take_clears_slot() {
            let mut registry = PendingActionRegistry::new();
            registry.stage(quiz()).unwrap();
            assert_eq!(registry.state(), ConfirmationState::Pending(ActionKind::Quiz));

            let taken = registry.take().unwrap();
            assert_eq!(taken.kind(), ActionKind::Quiz);
            assert_eq!(registry.state(), ConfirmationState::Empty);
        }

        #[test]
        fn second_stage_is_rejected_and_first_kept() {
            let mut registry = PendingActionRegistry::new();
            registry.stage(announcement()).unwrap();

            let err = registry.stage(quiz()).unwrap_err();

            assert_eq!(
                err,
                RegistryError::AlreadyPending { pending: ActionKind::Announcement }
            );
            assert_eq!(registry.peek().map(|a| a.kind()), Some(ActionKind::Announcement));
        }

        #[test]
        fn same_kind_is_also_rejected() {
            let mut registry = PendingActionRegistry::new();
            registry.stage(quiz()).unwrap();
            assert!(registry.stage(quiz()).is_err());
        }

        #[test]
        fn take_on_empty_is_none() {
            let mut registry = PendingActionRegistry::new();
            assert!(registry.take().is_none());
            assert!(!registry.is_pending());
        }

        #[test]
        fn clear_discards() {
            let mut registry = PendingActionRegistry::new();
            registry.stage(quiz()).unwrap();
            registry.clear();
            assert!(registry.peek().is_none());
        }
    }
}
