//! Resource library backed by sub-directories of a local folder.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;

use crate::domain::foundation::Timestamp;
use crate::domain::listing::ResourceFolder;
use crate::ports::{CollaboratorError, ResourceLibrary};

#[derive(Debug, Clone)]
pub struct LocalResourceLibrary {
    base_path: PathBuf,
}

impl LocalResourceLibrary {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ResourceLibrary for LocalResourceLibrary {
    async fn list_folders(&self) -> Result<Vec<ResourceFolder>, CollaboratorError> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_path)
            .await
            .map_err(|e| CollaboratorError::Unavailable(format!("resource library: {e}")))?;

        let mut folders = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CollaboratorError::Unavailable(format!("resource library: {e}")))?
        {
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }

            let last_modified = metadata
                .modified()
                .ok()
                .map(|t| Timestamp::from_datetime(DateTime::<Utc>::from(t)));
            folders.push(ResourceFolder { name, last_modified });
        }

        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_only_visible_directories_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("Machine Learning")).unwrap();
        std::fs::create_dir(dir.path().join("Calculus")).unwrap();
        std::fs::create_dir(dir.path().join(".cache")).unwrap();
        std::fs::write(dir.path().join("readme.txt"), "x").unwrap();

        let folders = LocalResourceLibrary::new(dir.path()).list_folders().await.unwrap();

        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Calculus", "Machine Learning"]);
        assert!(folders[0].last_modified.is_some());
    }

    #[tokio::test]
    async fn missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let library = LocalResourceLibrary::new(dir.path().join("nope"));
        assert!(library.list_folders().await.unwrap().is_empty());
    }
}
