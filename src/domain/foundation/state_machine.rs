//! State machine trait for lifecycle enums.
//!
//! Gives every lifecycle enum (currently the confirmation state of a
//! conversation) the same validated transition API.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors declare which transitions are legal; callers go through
/// [`StateMachine::transition_to`] so illegal moves surface as errors
/// instead of silently corrupting state.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ConfirmationState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Empty, Pending(_)) | (Pending(_), Empty))
///     }
/// }
///
/// let next = ConfirmationState::Empty.transition_to(ConfirmationState::Pending(kind))?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Open,
        Closed,
        Welded,
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Door::*;
            matches!((self, target), (Open, Closed) | (Closed, Open) | (Closed, Welded))
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Door::Open.transition_to(Door::Closed), Ok(Door::Closed));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Door::Open.transition_to(Door::Welded).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Open to Welded"));
    }

    #[test]
    fn welded_door_never_moves() {
        for target in [Door::Open, Door::Closed, Door::Welded] {
            assert!(Door::Welded.transition_to(target).is_err());
        }
    }
}
