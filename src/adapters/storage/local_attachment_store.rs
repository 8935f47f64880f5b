//! Filesystem-backed attachment store.
//!
//! Files land under a base directory with a unique prefix. The HTTP API
//! serves that directory under `/files`, which the default
//! `public_base_url` points at.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::ports::{AttachmentStore, CollaboratorError};

/// Stores attachments as plain files on local disk.
#[derive(Debug, Clone)]
pub struct LocalAttachmentStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalAttachmentStore {
    /// # Example
    /// ```ignore
    /// let store = LocalAttachmentStore::new("./data/attachments", "http://localhost:8000/files");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Unique on-disk name keeping the original extension readable.
    fn stored_name(filename: &str) -> String {
        let safe: String = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let id = Uuid::new_v4().simple().to_string();
        format!("{}-{}", &id[..12], safe)
    }
}

fn io_error(e: std::io::Error) -> CollaboratorError {
    CollaboratorError::Unavailable(format!("attachment storage: {e}"))
}

#[async_trait]
impl AttachmentStore for LocalAttachmentStore {
    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, CollaboratorError> {
        fs::create_dir_all(&self.base_path).await.map_err(io_error)?;

        let name = Self::stored_name(filename);
        let final_path = self.base_path.join(&name);
        let temp_path = self.base_path.join(format!(".{name}.tmp"));

        // Write-then-rename so readers never see a partial file.
        fs::write(&temp_path, bytes).await.map_err(io_error)?;
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(io_error(e));
        }

        tracing::info!(file = %name, size = bytes.len(), "Attachment stored");
        Ok(format!("{}/{}", self.public_base_url, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn upload_writes_file_and_returns_public_url() {
        let dir = TempDir::new().unwrap();
        let store = LocalAttachmentStore::new(dir.path(), "http://localhost:8000/files/");

        let url = store.upload(b"%PDF-1.4", "notes.pdf").await.unwrap();

        assert!(url.starts_with("http://localhost:8000/files/"));
        assert!(url.ends_with("-notes.pdf"));
        let stored = url.rsplit('/').next().unwrap();
        let contents = std::fs::read(dir.path().join(stored)).unwrap();
        assert_eq!(contents, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn no_temp_files_remain() {
        let dir = TempDir::new().unwrap();
        let store = LocalAttachmentStore::new(dir.path(), "http://h/files");
        store.upload(b"a", "a.txt").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(!names[0].ends_with(".tmp"));
    }

    #[tokio::test]
    async fn same_name_twice_keeps_both() {
        let dir = TempDir::new().unwrap();
        let store = LocalAttachmentStore::new(dir.path(), "http://h/files");
        let first = store.upload(b"1", "x.md").await.unwrap();
        let second = store.upload(b"2", "x.md").await.unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn stored_name_drops_path_components() {
        let name = LocalAttachmentStore::stored_name("../../etc/pass wd.txt");
        assert!(name.ends_with("-pass_wd.txt"));
        assert!(!name.contains('/'));
    }

    #[tokio::test]
    async fn creates_missing_base_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        let store = LocalAttachmentStore::new(&nested, "http://h");
        store.upload(b"x", "f.csv").await.unwrap();
        assert!(nested.is_dir());
    }
}
