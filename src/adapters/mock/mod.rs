//! In-memory mock collaborators for tests.
//!
//! Every mock records its calls and replays scripted results in order,
//! falling back to a sensible default once the script runs out.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockContentGenerator::new()
//!     .with_reply("Recursion Basics")
//!     .with_error(CollaboratorError::Network("reset".into()));
//!
//! let title = generator.generate(PromptKind::Title, "body", None).await?;
//! assert_eq!(generator.call_count(), 1);
//! ```

mod assistant;
mod canvas;
mod research;
mod storage;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub use assistant::{GenerateCall, MockContentGenerator, MockIntentClassifier};
pub use canvas::{MockActionExecutor, MockCourseDirectory};
pub use research::{MockResourceLibrary, MockWebResearcher};
pub use storage::MockAttachmentStore;

use crate::ports::CollaboratorError;

/// FIFO of scripted results shared between clones of a mock.
#[derive(Debug)]
struct Script<T> {
    queue: Arc<Mutex<VecDeque<Result<T, CollaboratorError>>>>,
}

impl<T> Clone for Script<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }
}

impl<T> Script<T> {
    fn push(&self, result: Result<T, CollaboratorError>) {
        self.queue.lock().unwrap().push_back(result);
    }

    fn next(&self) -> Option<Result<T, CollaboratorError>> {
        self.queue.lock().unwrap().pop_front()
    }
}

/// Call log shared between clones of a mock.
#[derive(Debug)]
struct Calls<C> {
    log: Arc<Mutex<Vec<C>>>,
}

impl<C> Clone for Calls<C> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<C> Default for Calls<C> {
    fn default() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<C: Clone> Calls<C> {
    fn record(&self, call: C) {
        self.log.lock().unwrap().push(call);
    }

    fn all(&self) -> Vec<C> {
        self.log.lock().unwrap().clone()
    }

    fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}
