//! Mock web researcher and resource library.

use async_trait::async_trait;

use super::{Calls, Script};
use crate::domain::listing::ResourceFolder;
use crate::ports::{CollaboratorError, ResourceLibrary, WebResearcher};

#[derive(Debug, Clone, Default)]
pub struct MockWebResearcher {
    script: Script<String>,
    calls: Calls<(Option<String>, String)>,
}

impl MockWebResearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.script.push(Ok(answer.into()));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Recorded `(url, question)` pairs.
    pub fn calls(&self) -> Vec<(Option<String>, String)> {
        self.calls.all()
    }
}

#[async_trait]
impl WebResearcher for MockWebResearcher {
    async fn answer(&self, url: Option<&str>, question: &str) -> Result<String, CollaboratorError> {
        self.calls.record((url.map(str::to_string), question.to_string()));
        self.script
            .next()
            .unwrap_or_else(|| Ok(format!("Mock answer to: {question}")))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockResourceLibrary {
    folders: Vec<ResourceFolder>,
    failures: Script<()>,
}

impl MockResourceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder(mut self, name: impl Into<String>) -> Self {
        self.folders.push(ResourceFolder::new(name));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.failures.push(Err(error));
        self
    }
}

#[async_trait]
impl ResourceLibrary for MockResourceLibrary {
    async fn list_folders(&self) -> Result<Vec<ResourceFolder>, CollaboratorError> {
        self.failures.next().unwrap_or(Ok(()))?;
        Ok(self.folders.clone())
    }
}
