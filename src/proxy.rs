//! # Signing Proxy
//!
//! The request pipeline that turns one inbound request into at most one
//! Last.fm call and one JSON answer:
//!
//! ```text
//! extract -+- action=getLoginUrl ---------------> { authUrl }        200
//!          +- prepare -> dispatch -> translate -> upstream JSON     200 / 400
//!                 any step fails ---------------> { error, message } 400 / 500
//! ```
//!
//! Every step returns a `Result`; [`SigningProxy::handle`] is the only place
//! where errors become responses. The proxy holds read-only configuration and a
//! shared HTTP client, so one instance serves any number of concurrent requests.

use std::collections::HashMap;

use axum::http::{Method, StatusCode};

use crate::{
    config::Config,
    error::ProxyError,
    info,
    lastfm::{self, LastfmClient, UpstreamReply},
    params::{API_KEY, API_SIG, FORMAT, ParamSet},
    types::{InboundRequest, LoginUrlResponse, ProxyResponse, RequestIntent},
    warning,
};

pub const ACTION: &str = "action";
pub const ACTION_GET_LOGIN_URL: &str = "getLoginUrl";
pub const CALLBACK: &str = "callback";
pub const RESPONSE_FORMAT: &str = "json";

/// Result of the pipeline before it is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The login URL shortcut; no upstream call was made.
    LoginUrl(String),
    /// The Last.fm method that was called and what Last.fm answered.
    Upstream { method: String, reply: UpstreamReply },
}

#[derive(Debug, Clone)]
pub struct SigningProxy {
    config: Config,
    client: LastfmClient,
}

impl SigningProxy {
    /// Creates a proxy that forwards to `config.api_url` with a default HTTP client.
    pub fn new(config: Config) -> Self {
        let client = LastfmClient::new(config.api_url.clone());
        Self { config, client }
    }

    /// Creates a proxy around an existing upstream client. The client's URL is
    /// used as is; `config.api_url` is not consulted.
    pub fn with_client(config: Config, client: LastfmClient) -> Self {
        Self { config, client }
    }

    /// Handles one inbound request and always produces a complete response.
    pub async fn handle(&self, request: InboundRequest) -> ProxyResponse {
        let verb = request.method.clone();

        match self.process(request).await.and_then(|o| render(&verb, o)) {
            Ok(response) => response,
            Err(e) => {
                let status = e.status();
                warning!("{} failed -> {}: {}", verb, status.as_u16(), e);
                ProxyResponse::from(e)
            }
        }
    }

    /// Runs the pipeline without rendering: extract, shortcut, prepare, dispatch.
    pub async fn process(&self, request: InboundRequest) -> Result<Outcome, ProxyError> {
        if request.method == Method::GET {
            if let Some(url) = self.login_url_shortcut(&request.query)? {
                return Ok(Outcome::LoginUrl(url));
            }
        }

        let mut params = extract(request)?;
        let intent = self.prepare(&mut params)?;
        let reply = self.client.dispatch(&params, intent).await?;

        Ok(Outcome::Upstream {
            method: params.method().unwrap_or_default().to_string(),
            reply,
        })
    }

    /// Returns the auth URL when the query asks for `action=getLoginUrl`.
    fn login_url_shortcut(
        &self,
        query: &HashMap<String, String>,
    ) -> Result<Option<String>, ProxyError> {
        if query.get(ACTION).map(String::as_str) != Some(ACTION_GET_LOGIN_URL) {
            return Ok(None);
        }

        let callback = query
            .get(CALLBACK)
            .ok_or_else(|| ProxyError::malformed("getLoginUrl requires a callback parameter"))?;

        Ok(Some(lastfm::login_url(
            &self.config.auth_url,
            &self.config.api_key,
            callback,
        )))
    }

    /// Augments the parameter set for dispatch and returns how it must be sent.
    ///
    /// Drops any caller-supplied `api_sig`, sets `api_key` and `format=json`, and
    /// signs the set when its method requires it. `format` is excluded from the
    /// signature by [`ParamSet::signature_base`].
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::MalformedInput`] if `method` is missing or empty.
    pub fn prepare(&self, params: &mut ParamSet) -> Result<RequestIntent, ProxyError> {
        match params.method() {
            Some(m) if !m.is_empty() => {}
            _ => return Err(ProxyError::malformed("missing method parameter")),
        }

        params.remove(API_SIG);
        params.set(API_KEY, self.config.api_key.as_str());
        params.set(FORMAT, RESPONSE_FORMAT);

        let intent = params.intent();
        if intent.is_signed() {
            params.sign(&self.config.api_secret);
        }

        Ok(intent)
    }
}

/// Builds the parameter set from the query (GET) or the JSON body (anything else).
pub fn extract(request: InboundRequest) -> Result<ParamSet, ProxyError> {
    if request.method == Method::GET {
        Ok(ParamSet::from_query(request.query))
    } else {
        ParamSet::from_json(&request.body)
    }
}

fn render(verb: &Method, outcome: Outcome) -> Result<ProxyResponse, ProxyError> {
    match outcome {
        Outcome::LoginUrl(auth_url) => {
            let body = serde_json::to_value(LoginUrlResponse { auth_url })
                .map_err(|e| ProxyError::Internal(e.to_string()))?;
            info!("{} getLoginUrl -> 200", verb);
            Ok(ProxyResponse::ok(body))
        }
        Outcome::Upstream { method, reply } => Ok(translate(verb, &method, reply)),
    }
}

/// Maps an upstream reply to the caller's response: 400 when Last.fm reported an
/// error, 200 otherwise. The upstream JSON is passed through unchanged.
pub fn translate(verb: &Method, method: &str, reply: UpstreamReply) -> ProxyResponse {
    match reply {
        UpstreamReply::ApiError {
            code,
            message,
            body,
        } => {
            warning!(
                "{} {} -> 400, Last.fm error {}: {}",
                verb,
                method,
                code,
                message.as_deref().unwrap_or("no message")
            );
            ProxyResponse::new(StatusCode::BAD_REQUEST, body)
        }
        UpstreamReply::Success(body) => {
            info!("{} {} -> 200", verb, method);
            ProxyResponse::ok(body)
        }
    }
}
