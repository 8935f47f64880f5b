//! Request and response bodies for the orchestrator API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ConversationId;

use super::ApiError;

/// Body of `POST /agent-workflow`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

impl WorkflowRequest {
    /// The message text, rejecting a missing field.
    pub fn message(&self) -> Result<&str, ApiError> {
        self.message
            .as_deref()
            .ok_or_else(|| ApiError::bad_request("Field 'message' is required"))
    }
}

/// Parses an optional client-supplied conversation id; blank means absent.
pub fn parse_conversation_id(raw: Option<&str>) -> Result<Option<ConversationId>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| ApiError::bad_request(format!("Invalid conversation id: {s}"))),
    }
}

/// Error body returned by every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn missing_message_is_bad_request() {
        let req: WorkflowRequest = serde_json::from_str(r#"{"conversation_id": null}"#).unwrap();
        assert_eq!(req.message().unwrap_err().code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn blank_conversation_id_means_new_session() {
        assert_eq!(parse_conversation_id(Some("  ")).unwrap(), None);
        assert_eq!(parse_conversation_id(None).unwrap(), None);
    }

    #[test]
    fn valid_conversation_id_is_parsed() {
        let id = ConversationId::new();
        let parsed = parse_conversation_id(Some(&id.to_string())).unwrap();
        assert_eq!(parsed, Some(id));
    }

    #[test]
    fn malformed_conversation_id_is_rejected() {
        assert!(parse_conversation_id(Some("not-a-uuid")).is_err());
    }
}
