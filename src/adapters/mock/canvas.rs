//! Mock course directory and action executor.

use async_trait::async_trait;

use super::{Calls, Script};
use crate::domain::foundation::CourseId;
use crate::domain::listing::CourseSummary;
use crate::ports::{
    ActionExecutor, CollaboratorError, CourseDirectory, ExecutionOutcome, ExecutionRequest,
};

/// Directory over a fixed set of courses.
///
/// Resolution is a case-insensitive substring match, like the real
/// platform client.
#[derive(Debug, Clone, Default)]
pub struct MockCourseDirectory {
    courses: Vec<(CourseSummary, CourseId)>,
    failures: Script<()>,
    resolve_calls: Calls<String>,
}

impl MockCourseDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course with the given platform id.
    pub fn with_course(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        let summary = CourseSummary {
            name: name.into(),
            code: None,
            member_count: None,
        };
        let id = CourseId::new(id).unwrap();
        self.courses.push((summary, id));
        self
    }

    /// Makes the next call fail with `error`.
    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.failures.push(Err(error));
        self
    }

    pub fn resolve_calls(&self) -> Vec<String> {
        self.resolve_calls.all()
    }

    fn next_failure(&self) -> Result<(), CollaboratorError> {
        self.failures.next().unwrap_or(Ok(()))
    }
}

#[async_trait]
impl CourseDirectory for MockCourseDirectory {
    async fn resolve(&self, name: &str) -> Result<Option<CourseId>, CollaboratorError> {
        self.resolve_calls.record(name.to_string());
        self.next_failure()?;
        let needle = name.to_lowercase();
        Ok(self
            .courses
            .iter()
            .find(|(summary, _)| summary.name.to_lowercase().contains(&needle))
            .map(|(_, id)| id.clone()))
    }

    async fn list(&self) -> Result<Vec<CourseSummary>, CollaboratorError> {
        self.next_failure()?;
        Ok(self.courses.iter().map(|(summary, _)| summary.clone()).collect())
    }
}

/// Executor that records requests and succeeds unless scripted otherwise.
#[derive(Debug, Clone, Default)]
pub struct MockActionExecutor {
    script: Script<ExecutionOutcome>,
    calls: Calls<ExecutionRequest>,
}

impl MockActionExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(self, outcome: ExecutionOutcome) -> Self {
        self.script.push(Ok(outcome));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn calls(&self) -> Vec<ExecutionRequest> {
        self.calls.all()
    }
}

#[async_trait]
impl ActionExecutor for MockActionExecutor {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionOutcome, CollaboratorError> {
        self.calls.record(request);
        self.script
            .next()
            .unwrap_or_else(|| Ok(ExecutionOutcome::succeeded("ok")))
    }
}
