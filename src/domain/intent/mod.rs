//! Intent domain module.
//!
//! The closed label set and the priority-ordered rule table evaluated
//! before any external classifier is consulted.

mod label;
mod rules;

pub use label::IntentLabel;
pub use rules::{pre_filter, PreFilterRule};
