//! Helpers shared by the outbound HTTP clients.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::ports::CollaboratorError;

/// Builds a client with a request timeout, falling back to the default
/// client if the builder rejects the settings.
pub(crate) fn client_with_timeout(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Maps a transport error onto the collaborator taxonomy.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> CollaboratorError {
    if err.is_timeout() {
        CollaboratorError::Timeout {
            secs: timeout.as_secs(),
        }
    } else if err.is_connect() {
        CollaboratorError::Network(format!("Connection failed: {err}"))
    } else {
        CollaboratorError::Network(err.to_string())
    }
}

/// Passes successful responses through and turns the rest into
/// [`CollaboratorError::Api`] carrying the body text.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, CollaboratorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CollaboratorError::Api {
        status: status.as_u16(),
        message: truncate(&body, 300),
    })
}

/// Reads at most `limit` bytes of the body as lossy UTF-8; the rest is
/// never downloaded.
pub(crate) async fn read_text_capped(
    mut response: Response,
    limit: usize,
) -> Result<String, CollaboratorError> {
    let expected = response.content_length().unwrap_or(0);
    let mut buf = Vec::with_capacity(usize::try_from(expected).unwrap_or(limit).min(limit));

    while buf.len() < limit {
        let chunk = response
            .chunk()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse(format!("Failed to read body: {e}")))?;
        let Some(chunk) = chunk else { break };
        let room = limit - buf.len();
        buf.extend_from_slice(&chunk[..chunk.len().min(room)]);
    }

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Cuts `text` to at most `max` characters on a char boundary.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
