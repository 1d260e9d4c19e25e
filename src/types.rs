use std::collections::HashMap;

use axum::http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

/// Last.fm methods that must be signed and sent as a form-encoded POST.
pub const SIGNED_METHODS: [&str; 2] = ["auth.getSession", "track.love"];

/// How a request travels upstream, derived from its `method` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestIntent {
    /// Plain GET with the parameters in the query string.
    Unsigned,
    /// POST with a form body including `api_sig`.
    Signed,
}

impl RequestIntent {
    pub fn classify(method: Option<&str>) -> Self {
        match method {
            Some(m) if SIGNED_METHODS.contains(&m) => RequestIntent::Signed,
            _ => RequestIntent::Unsigned,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, RequestIntent::Signed)
    }
}

/// A request as handed over by the HTTP layer (or the CLI).
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub query: HashMap<String, String>,
    pub body: String,
}

impl InboundRequest {
    pub fn get(query: HashMap<String, String>) -> Self {
        Self {
            method: Method::GET,
            query,
            body: String::new(),
        }
    }

    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            query: HashMap::new(),
            body: body.into(),
        }
    }
}

/// The complete answer for a caller. Rendered with JSON and CORS headers by
/// the `IntoResponse` implementation in [`crate::api`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ProxyResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    pub fn ok(body: Value) -> Self {
        Self::new(StatusCode::OK, body)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUrlResponse {
    pub auth_url: String,
}

#[derive(Tabled)]
pub struct ParamTableRow {
    pub name: String,
    pub value: String,
    pub signed: String,
}
