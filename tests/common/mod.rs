//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use canvas_orchestrator::adapters::mock::{
    MockActionExecutor, MockAttachmentStore, MockContentGenerator, MockCourseDirectory,
    MockIntentClassifier, MockResourceLibrary, MockWebResearcher,
};
use canvas_orchestrator::application::{Collaborators, Orchestrator, OrchestratorSettings};

/// Mocks wired into a collaborator bundle, with handles kept for assertions.
#[derive(Clone, Default)]
pub struct Mocks {
    pub classifier: MockIntentClassifier,
    pub generator: MockContentGenerator,
    pub directory: MockCourseDirectory,
    pub executor: MockActionExecutor,
    pub attachments: MockAttachmentStore,
    pub researcher: MockWebResearcher,
    pub library: MockResourceLibrary,
}

impl Mocks {
    /// Mocks knowing the courses "Intro CS" (101) and "Biology 200" (200).
    pub fn with_courses() -> Self {
        Self {
            directory: MockCourseDirectory::new()
                .with_course("Intro CS", "101")
                .with_course("Biology 200", "200"),
            ..Default::default()
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            classifier: Arc::new(self.classifier.clone()),
            generator: Arc::new(self.generator.clone()),
            directory: Arc::new(self.directory.clone()),
            executor: Arc::new(self.executor.clone()),
            attachments: Arc::new(self.attachments.clone()),
            researcher: Arc::new(self.researcher.clone()),
            library: Arc::new(self.library.clone()),
        }
    }

    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.collaborators(), OrchestratorSettings::default())
    }
}
