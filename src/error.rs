use axum::http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

use crate::types::ProxyResponse;

/// Failures that can end a proxied request before an upstream reply exists.
///
/// An upstream reply carrying an `error` field is not a `ProxyError`; it is a
/// regular reply that gets relayed with status 400 (see
/// [`crate::lastfm::UpstreamReply`]).
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The caller sent something the proxy cannot work with: a body that is not a
    /// JSON object, or a request without `method` or `callback` where one is needed.
    #[error("malformed request: {0}")]
    MalformedInput(String),

    /// The upstream could not be reached or the connection broke mid-request.
    /// The URL is stripped on conversion since unsigned calls carry the API key in it.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream answered, but not with JSON.
    #[error("invalid upstream response: {0}")]
    InvalidUpstreamResponse(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ProxyError::Transport(_)
            | ProxyError::InvalidUpstreamResponse(_)
            | ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the JSON body sent to the caller.
    ///
    /// `error` holds the reason phrase of [`ProxyError::status`] and is never
    /// empty; `message` carries the detail.
    pub fn to_body(&self) -> Value {
        let reason = match self {
            ProxyError::MalformedInput(_) => "Bad Request",
            _ => "Internal Server Error",
        };

        let message = match self {
            ProxyError::Transport(_) => "upstream request failed".to_string(),
            other => other.to_string(),
        };

        json!({
            "error": reason,
            "message": message,
        })
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        ProxyError::Transport(e.without_url())
    }
}

impl From<ProxyError> for ProxyResponse {
    fn from(e: ProxyError) -> Self {
        ProxyResponse::new(e.status(), e.to_body())
    }
}
