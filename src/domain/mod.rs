//! Domain layer: pure types and rules of the orchestrator.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machines)
//! - `conversation` - Message log and the recent-context window
//! - `intent` - Intent labels and the priority-ordered pre-filter
//! - `extraction` - Parameter grammar for free-text requests
//! - `action` - Pending actions and the confirmation lifecycle
//! - `listing` - Course and resource listings

pub mod action;
pub mod conversation;
pub mod extraction;
pub mod foundation;
pub mod intent;
pub mod listing;
