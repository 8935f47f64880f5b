//! Short replies that resolve a pending action.

const AFFIRMATIVE: [&str; 4] = ["yes", "post", "post it", "yes post it"];
const NEGATIVE: [&str; 4] = ["no", "cancel", "dont post", "don't post"];

/// A confirmation reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationToken {
    Affirm,
    Cancel,
}

impl ConfirmationToken {
    /// Matches the whole trimmed message, case-insensitively.
    ///
    /// Longer messages that merely contain "yes" are not tokens.
    pub fn parse(message: &str) -> Option<Self> {
        let normalized = message
            .trim()
            .to_lowercase()
            .replace(['\u{2019}', '\u{2018}'], "'");

        if AFFIRMATIVE.contains(&normalized.as_str()) {
            Some(ConfirmationToken::Affirm)
        } else if NEGATIVE.contains(&normalized.as_str()) {
            Some(ConfirmationToken::Cancel)
        } else {
            None
        }
    }
}
