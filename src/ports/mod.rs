//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the orchestration core and the outside world. Adapters implement these
//! ports; the core only ever sees the traits.
//!
//! ## Conversation Ports
//!
//! - `IntentClassifier` - Labels messages the pre-filter cannot decide
//! - `ContentGenerator` - Titles, bodies and free-form replies
//!
//! ## Course Platform Ports
//!
//! - `CourseDirectory` - Course name resolution and listing
//! - `ActionExecutor` - Executes confirmed actions
//! - `AttachmentStore` - Stores files attached to actions
//!
//! ## Research Ports
//!
//! - `WebResearcher` - Answers questions about a URL or the web
//! - `ResourceLibrary` - Lists folders of reference material

mod action_executor;
mod attachment_store;
mod content_generator;
mod course_directory;
mod error;
mod intent_classifier;
mod resource_library;
mod web_researcher;

pub use action_executor::{ActionExecutor, AssignmentParams, ExecutionOutcome, ExecutionRequest};
pub use attachment_store::AttachmentStore;
pub use content_generator::{ContentGenerator, PromptKind};
pub use course_directory::CourseDirectory;
pub use error::CollaboratorError;
pub use intent_classifier::IntentClassifier;
pub use resource_library::ResourceLibrary;
pub use web_researcher::WebResearcher;
