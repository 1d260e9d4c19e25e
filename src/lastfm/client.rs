use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::Value;

use crate::{error::ProxyError, params::ParamSet, types::RequestIntent};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// What the Last.fm web service answered.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// A JSON document without an `error` field.
    Success(Value),
    /// A JSON object carrying Last.fm's `error` code, e.g.
    /// `{"error":4,"message":"Invalid session key"}`.
    ApiError {
        code: Value,
        message: Option<String>,
        body: Value,
    },
}

impl UpstreamReply {
    /// Classifies a parsed upstream document by the presence of `error`.
    pub fn from_value(body: Value) -> Self {
        match body.get("error").cloned() {
            Some(code) => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                UpstreamReply::ApiError {
                    code,
                    message,
                    body,
                }
            }
            None => UpstreamReply::Success(body),
        }
    }

    /// Whether Last.fm reported an API error; such replies are relayed with 400.
    pub fn is_error(&self) -> bool {
        matches!(self, UpstreamReply::ApiError { .. })
    }

    /// The JSON document exactly as received.
    pub fn body(&self) -> &Value {
        match self {
            UpstreamReply::Success(body) => body,
            UpstreamReply::ApiError { body, .. } => body,
        }
    }
}

/// Thin wrapper around [`reqwest::Client`] bound to one Last.fm endpoint.
///
/// The inner client is reference counted, so clones share one connection pool.
#[derive(Debug, Clone)]
pub struct LastfmClient {
    http: Client,
    api_url: String,
}

impl LastfmClient {
    /// Creates a client for `api_url` with a default [`reqwest::Client`].
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    /// Creates a client for `api_url` on top of a preconfigured
    /// [`reqwest::Client`], e.g. one with a request timeout or a user agent.
    ///
    /// # Example
    ///
    /// ```
    /// let http = reqwest::Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// let client = LastfmClient::with_client(http, config::DEFAULT_API_URL);
    /// ```
    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Full URL of an unsigned GET call: the base URL followed by
    /// [`ParamSet::to_query_string`].
    pub fn query_url(&self, params: &ParamSet) -> String {
        let separator = if self.api_url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.api_url, separator, params.to_query_string())
    }

    /// Issues exactly one upstream call for a prepared parameter set.
    ///
    /// Signed calls are POSTed with a form-encoded body to the base URL; unsigned
    /// calls are sent as GET with the parameters in the query string. The HTTP
    /// status of the reply is ignored: Last.fm reports failures in the JSON body.
    ///
    /// # Errors
    ///
    /// - [`ProxyError::Transport`] if the request cannot be sent or the body
    ///   cannot be read
    /// - [`ProxyError::InvalidUpstreamResponse`] if the body is not JSON
    pub async fn dispatch(
        &self,
        params: &ParamSet,
        intent: RequestIntent,
    ) -> Result<UpstreamReply, ProxyError> {
        let request = match intent {
            RequestIntent::Signed => self
                .http
                .post(&self.api_url)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .form(&params.to_form_pairs()),
            RequestIntent::Unsigned => self.http.get(self.query_url(params)),
        };

        let response = request.send().await?;
        let text = response.text().await?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            ProxyError::InvalidUpstreamResponse(format!("body is not JSON: {}", e))
        })?;

        Ok(UpstreamReply::from_value(body))
    }
}
