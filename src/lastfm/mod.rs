//! # Last.fm Integration Module
//!
//! This module holds everything that knows about the Last.fm web service: how
//! request signatures are computed, how the web authentication URL looks and
//! how a prepared parameter set is sent upstream.
//!
//! ## Request Shapes
//!
//! Last.fm accepts exactly two shapes from this proxy:
//!
//! ```text
//! unsigned:  GET  https://ws.audioscrobbler.com/2.0/?method=...&api_key=...&format=json
//! signed:    POST https://ws.audioscrobbler.com/2.0/
//!            Content-Type: application/x-www-form-urlencoded
//!            method=...&api_key=...&format=json&api_sig=...
//! ```
//!
//! Which shape a request takes is decided by [`crate::types::RequestIntent`].
//!
//! ## Signatures
//!
//! [`signature::Signature`] is the MD5 digest of the canonical parameter string
//! built by [`crate::params::ParamSet::signature_base`]: all pairs except
//! `format`, sorted by key, written as key followed by value, then the secret.
//!
//! ## Error Reporting
//!
//! Last.fm reports API failures inside a JSON body with an `error` code and a
//! `message`. [`UpstreamReply`] keeps that distinction so the proxy can relay the
//! payload with a 400 instead of treating it as a transport failure.
//!
//! ## Submodules
//!
//! - [`auth`] - web authentication URL
//! - [`client`] - upstream HTTP client
//! - [`signature`] - `api_sig` computation

pub mod auth;
pub mod client;
pub mod signature;

pub use auth::login_url;
pub use client::{LastfmClient, UpstreamReply};
pub use signature::Signature;
