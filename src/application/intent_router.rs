//! Intent routing: deterministic pre-filter, then the external classifier.

use std::sync::Arc;
use std::time::Duration;

use super::collaborators::bounded;
use crate::domain::intent::{pre_filter, IntentLabel, PreFilterRule};
use crate::ports::IntentClassifier;

/// How a label was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    /// A pre-filter rule matched.
    Rule(PreFilterRule),
    /// The classifier answered.
    Classifier,
    /// The classifier failed; the default label was used.
    Fallback,
}

/// Outcome of routing one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub label: IntentLabel,
    pub source: RouteSource,
}

pub struct IntentRouter {
    classifier: Arc<dyn IntentClassifier>,
    timeout: Duration,
}

impl IntentRouter {
    pub fn new(classifier: Arc<dyn IntentClassifier>, timeout: Duration) -> Self {
        Self {
            classifier,
            timeout,
        }
    }

    /// Classifies `message`; never fails.
    pub async fn classify(&self, message: &str, context: &str) -> Route {
        if let Some(rule) = pre_filter(message) {
            return Route {
                label: rule.label(),
                source: RouteSource::Rule(rule),
            };
        }

        match bounded(self.timeout, self.classifier.classify(message, context)).await {
            Ok(reply) => Route {
                label: IntentLabel::from_classifier_reply(&reply),
                source: RouteSource::Classifier,
            },
            Err(err) => {
                tracing::warn!(error = %err, "Intent classification failed, defaulting to general");
                Route {
                    label: IntentLabel::General,
                    source: RouteSource::Fallback,
                }
            }
        }
    }
}
