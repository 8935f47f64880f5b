//! Bounded context window over a conversation log.
//!
//! Classification and generation only ever see the most recent few
//! messages. [`RecentContext`] is a read-only view over that tail which
//! renders a two-role transcript on demand.

use std::fmt;

use super::message::Message;

/// Number of messages included in the context window by default.
pub const DEFAULT_CONTEXT_WINDOW: usize = 5;

/// Read-only view over the last `n` messages of a conversation.
///
/// Nothing is formatted until the view is iterated or displayed, and the
/// view can be iterated any number of times.
#[derive(Debug, Clone, Copy)]
pub struct RecentContext<'a> {
    messages: &'a [Message],
}

impl<'a> RecentContext<'a> {
    /// Creates a view over the last `window` messages of `log`.
    pub fn new(log: &'a [Message], window: usize) -> Self {
        let start = log.len().saturating_sub(window);
        Self {
            messages: &log[start..],
        }
    }

    /// Number of messages in the window.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true when there is no prior message.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in the window, oldest first.
    pub fn messages(&self) -> &'a [Message] {
        self.messages
    }

    /// Lazily formatted transcript lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = String> + 'a {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role().speaker(), m.content()))
    }
}

impl fmt::Display for RecentContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_of(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("question {i}"))
                } else {
                    Message::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn empty_log_renders_empty_string() {
        let log = log_of(0);
        let ctx = RecentContext::new(&log, DEFAULT_CONTEXT_WINDOW);
        assert!(ctx.is_empty());
        assert_eq!(ctx.to_string(), "");
    }

    #[test]
    fn window_keeps_only_most_recent_messages() {
        let log = log_of(8);
        let ctx = RecentContext::new(&log, 5);
        assert_eq!(ctx.len(), 5);
        assert_eq!(ctx.messages()[0].content(), "answer 3");
        assert_eq!(ctx.messages()[4].content(), "answer 7");
    }

    #[test]
    fn short_log_is_returned_whole() {
        let log = log_of(2);
        let ctx = RecentContext::new(&log, 5);
        assert_eq!(ctx.to_string(), "User: question 0\nAssistant: answer 1");
    }

    #[test]
    fn zero_window_is_empty() {
        let log = log_of(3);
        assert!(RecentContext::new(&log, 0).is_empty());
    }

    #[test]
    fn lines_can_be_iterated_repeatedly() {
        let log = log_of(3);
        let ctx = RecentContext::new(&log, 5);
        let first: Vec<_> = ctx.lines().collect();
        let second: Vec<_> = ctx.lines().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
