//! # API Module
//!
//! HTTP handlers of the proxy server, built on [axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - [`proxy`] - Forwards Last.fm calls, signing them where required, and
//!   answers CORS preflight requests. Every response carries
//!   `Access-Control-Allow-Origin: *` and a JSON body.
//! - [`health`] - Returns service name, status and version for monitoring.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::{any, get}};
//! use lfmproxy::api::{health, proxy};
//!
//! let app = Router::new()
//!     .route("/lastfm-proxy", any(proxy))
//!     .route("/health", get(health))
//!     .with_state(shared_proxy);
//! ```

mod health;
mod proxy;

pub use health::health;
pub use proxy::{ALLOWED_HEADERS, ALLOWED_METHODS, preflight, proxy};
