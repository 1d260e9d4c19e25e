use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{
        HeaderValue, Method, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    response::{IntoResponse, Json, Response},
};

use crate::{
    error::ProxyError,
    proxy::SigningProxy,
    types::{InboundRequest, ProxyResponse},
    warning,
};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Entry point of the signing proxy for every HTTP method.
///
/// `OPTIONS` is answered as a CORS preflight. `GET` requests carry their
/// parameters in the query string; every other method is expected to send a
/// JSON object body. A query string that cannot be decoded is reported
/// the same way as a body that is not UTF-8: as malformed input, with the CORS
/// header in place.
pub async fn proxy(
    State(proxy): State<Arc<SigningProxy>>,
    method: Method,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return preflight().await.into_response();
    }

    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            return reject(&method, format!("invalid query string: {}", e.body_text()));
        }
    };

    let body = match String::from_utf8(body.to_vec()) {
        Ok(body) => body,
        Err(_) => return reject(&method, "request body is not valid UTF-8".to_string()),
    };

    let request = InboundRequest {
        method,
        query,
        body,
    };

    proxy.handle(request).await.into_response()
}

fn reject(method: &Method, message: String) -> Response {
    let e = ProxyError::malformed(message);
    warning!("{} rejected -> {}: {}", method, e.status().as_u16(), e);
    ProxyResponse::from(e).into_response()
}

/// CORS preflight answer for browsers calling the proxy from another origin.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
        ],
    )
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.body)).into_response();
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        response
    }
}
