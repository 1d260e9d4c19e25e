#![allow(dead_code)]

use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    Form, Router,
    extract::{Query, RawQuery, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use lfmproxy::{config::Config, proxy::SigningProxy};
use tokio::{net::TcpListener, sync::Mutex};

pub const API_KEY: &str = "K123";
pub const API_SECRET: &str = "s3cr3t";

/// One request as seen by the fake Last.fm endpoint.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub raw_query: Option<String>,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub form: HashMap<String, String>,
}

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// A local stand-in for `ws.audioscrobbler.com` that records every request and
/// answers with a fixed status and body.
pub struct FakeLastfm {
    pub url: String,
    pub requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeLastfm {
    pub async fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().await.clone()
    }

    pub fn config(&self) -> Config {
        Config::new(API_KEY, API_SECRET).with_api_url(self.url.clone())
    }

    pub fn proxy(&self) -> SigningProxy {
        SigningProxy::new(self.config())
    }
}

pub async fn spawn_upstream(status: StatusCode, body: &str) -> FakeLastfm {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = UpstreamState {
        status,
        body: body.to_string(),
        requests: Arc::clone(&requests),
    };

    let app = Router::new()
        .route("/2.0/", get(on_get).post(on_post))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeLastfm {
        url: format!("http://{}/2.0/", addr),
        requests,
    }
}

async fn on_get(
    State(state): State<UpstreamState>,
    RawQuery(raw_query): RawQuery,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, [(axum::http::HeaderName, &'static str); 1], String) {
    state.requests.lock().await.push(Recorded {
        method: "GET".to_string(),
        raw_query,
        query,
        content_type: None,
        form: HashMap::new(),
    });
    (state.status, [(CONTENT_TYPE, "application/json")], state.body)
}

async fn on_post(
    State(state): State<UpstreamState>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, [(axum::http::HeaderName, &'static str); 1], String) {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.requests.lock().await.push(Recorded {
        method: "POST".to_string(),
        raw_query,
        query: HashMap::new(),
        content_type,
        form,
    });
    (state.status, [(CONTENT_TYPE, "application/json")], state.body)
}

/// An address nothing listens on, for transport failures.
pub async fn closed_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

pub fn query_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
