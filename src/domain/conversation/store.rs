//! Append-only conversation log owned by a single session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::RecentContext;
use super::message::Message;
use crate::domain::intent::IntentLabel;

/// Serializable state of one conversation.
///
/// Message order is significant: it defines recency for windowing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Every exchanged message, oldest first.
    pub messages: Vec<Message>,
    /// Side-channel values (e.g. the last uploaded file name).
    pub context: HashMap<String, Value>,
    /// Intent of the most recently routed message.
    pub current_intent: Option<IntentLabel>,
}

/// Ordered message log plus a small context map.
///
/// Only the orchestrator of the owning session mutates a store; there is
/// no API for editing or removing individual messages.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    state: ConversationState,
}

impl ConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the end of the log.
    pub fn append(&mut self, message: Message) {
        self.state.messages.push(message);
    }

    /// Transcript view over the last `n` messages.
    pub fn recent_context(&self, n: usize) -> RecentContext<'_> {
        RecentContext::new(&self.state.messages, n)
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.state.messages.len()
    }

    /// Returns true if nothing has been exchanged yet.
    pub fn is_empty(&self) -> bool {
        self.state.messages.is_empty()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    /// Sets a side-channel context value.
    pub fn set_context(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state.context.insert(key.into(), value.into());
    }

    /// Reads a side-channel context value.
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.state.context.get(key)
    }

    /// Records the intent of the message being processed.
    pub fn set_current_intent(&mut self, intent: IntentLabel) {
        self.state.current_intent = Some(intent);
    }

    /// Intent of the most recently routed message.
    pub fn current_intent(&self) -> Option<IntentLabel> {
        self.state.current_intent
    }

    /// Clones the current state for reporting.
    pub fn snapshot(&self) -> ConversationState {
        self.state.clone()
    }

    /// Drops every message and context entry.
    pub fn clear(&mut self) {
        self.state = ConversationState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order() {
        let mut store = ConversationStore::new();
        store.append(Message::user("first"));
        store.append(Message::assistant("second"));
        store.append(Message::user("third"));

        let contents: Vec<_> = store.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
    }

    #[test]
    fn fresh_store_has_empty_context() {
        let store = ConversationStore::new();
        assert_eq!(store.recent_context(5).to_string(), "");
    }

    #[test]
    fn recent_context_is_bounded() {
        let mut store = ConversationStore::new();
        for i in 0..12 {
            store.append(Message::user(format!("m{i}")));
        }
        assert_eq!(store.recent_context(5).len(), 5);
        assert_eq!(store.len(), 12);
    }

    #[test]
    fn context_map_round_trips() {
        let mut store = ConversationStore::new();
        store.set_context("attachment", "notes.pdf");
        assert_eq!(store.context_value("attachment"), Some(&Value::from("notes.pdf")));
    }

    #[test]
    fn snapshot_reflects_current_intent() {
        let mut store = ConversationStore::new();
        store.set_current_intent(IntentLabel::Quiz);
        assert_eq!(store.snapshot().current_intent, Some(IntentLabel::Quiz));
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = ConversationStore::new();
        store.append(Message::user("hello"));
        store.set_context("k", 1);
        store.set_current_intent(IntentLabel::General);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.snapshot(), ConversationState::default());
    }
}
