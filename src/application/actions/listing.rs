//! Listing handler: courses or resource folders.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ActionHandler, HandlerError, HandlerOutcome, HandlerRequest};
use crate::application::collaborators::bounded;
use crate::domain::intent::IntentLabel;
use crate::domain::listing::{self, ListingTarget};
use crate::ports::{CourseDirectory, ResourceLibrary};

pub struct ListingHandler {
    directory: Arc<dyn CourseDirectory>,
    library: Arc<dyn ResourceLibrary>,
    timeout: Duration,
}

impl ListingHandler {
    pub fn new(
        directory: Arc<dyn CourseDirectory>,
        library: Arc<dyn ResourceLibrary>,
        timeout: Duration,
    ) -> Self {
        Self {
            directory,
            library,
            timeout,
        }
    }
}

#[async_trait]
impl ActionHandler for ListingHandler {
    fn intent(&self) -> IntentLabel {
        IntentLabel::List
    }

    async fn handle(&self, request: HandlerRequest<'_>) -> Result<HandlerOutcome, HandlerError> {
        let response = match ListingTarget::from_message(request.message) {
            ListingTarget::Courses => {
                let courses = bounded(self.timeout, self.directory.list())
                    .await
                    .map_err(|source| HandlerError::Collaborator {
                        task: "list courses",
                        source,
                    })?;
                listing::format_courses(&courses)
            }
            ListingTarget::Resources => {
                let folders = bounded(self.timeout, self.library.list_folders())
                    .await
                    .map_err(|source| HandlerError::Collaborator {
                        task: "list resources",
                        source,
                    })?;
                listing::format_resources(&folders)
            }
        };
        Ok(HandlerOutcome::reply(response))
    }
}
