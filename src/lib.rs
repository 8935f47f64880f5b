//! Canvas Orchestrator - conversational assistant for course platforms.
//!
//! Routes each instructor message to an intent, stages course-changing
//! actions (announcements, quizzes, assignments, pages) and performs them
//! only after an explicit "yes".

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
