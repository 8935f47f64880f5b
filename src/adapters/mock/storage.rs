//! Mock attachment store.

use async_trait::async_trait;

use super::{Calls, Script};
use crate::ports::{AttachmentStore, CollaboratorError};

/// Store that keeps nothing and returns predictable URLs.
#[derive(Debug, Clone, Default)]
pub struct MockAttachmentStore {
    failures: Script<()>,
    calls: Calls<(String, usize)>,
}

impl MockAttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.failures.push(Err(error));
        self
    }

    /// Recorded `(filename, size)` pairs.
    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.calls.all()
    }
}

#[async_trait]
impl AttachmentStore for MockAttachmentStore {
    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, CollaboratorError> {
        self.calls.record((filename.to_string(), bytes.len()));
        self.failures.next().unwrap_or(Ok(()))?;
        Ok(format!("https://files.test/{filename}"))
    }
}
