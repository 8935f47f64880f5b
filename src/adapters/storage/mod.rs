//! Storage Adapters
//!
//! Local filesystem implementations of the storage-flavoured ports.
//!
//! ## Available Adapters
//!
//! - **LocalAttachmentStore** - Writes uploads to disk and returns a public link
//! - **LocalResourceLibrary** - Lists reference folders under a directory
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{LocalAttachmentStore, LocalResourceLibrary};
//!
//! let attachments = LocalAttachmentStore::new("./data/attachments", "http://localhost:8000/files");
//! let library = LocalResourceLibrary::new("./data/resources");
//! ```

mod local_attachment_store;
mod local_resource_library;

pub use local_attachment_store::LocalAttachmentStore;
pub use local_resource_library::LocalResourceLibrary;
