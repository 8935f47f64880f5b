//! Course Directory Port - resolves course names and lists courses.

use async_trait::async_trait;

use super::CollaboratorError;
use crate::domain::foundation::CourseId;
use crate::domain::listing::CourseSummary;

#[async_trait]
pub trait CourseDirectory: Send + Sync {
    /// Resolves a user-written course name; `Ok(None)` means not found.
    async fn resolve(&self, name: &str) -> Result<Option<CourseId>, CollaboratorError>;

    /// Courses available to the user.
    async fn list(&self) -> Result<Vec<CourseSummary>, CollaboratorError>;
}
