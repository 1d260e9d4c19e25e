//! # CLI Module
//!
//! Command implementations behind the `lfmproxy` binary. Every command receives
//! the [`crate::config::Config`] loaded by `main` and reuses the same pipeline
//! as the HTTP server, so what the CLI prints is what the server would send.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the proxy server
//! - [`sign`] - Shows the canonical signature string and `api_sig` for a set of
//!   parameters, useful when Last.fm answers with error 13 (invalid signature)
//! - [`login_url`] - Prints (and optionally opens) the Last.fm web auth URL
//! - [`call`] - Sends one request through the proxy pipeline and prints the reply
//!
//! ## Usage Patterns
//!
//! ```bash
//! lfmproxy serve --address 0.0.0.0:8888
//! lfmproxy sign method=auth.getSession token=abc
//! lfmproxy login-url --callback http://localhost:3000/callback --open
//! lfmproxy call method=artist.getInfo artist=Cher
//! ```

mod call;
mod login;
mod serve;
mod sign;

pub use call::call;
pub use login::login_url;
pub use serve::serve;
pub use sign::sign;

/// Parses a `KEY=VALUE` command-line argument.
///
/// Only the first `=` separates key and value, so values may contain `=`.
///
/// # Errors
///
/// Returns an error string if there is no `=` or the key is empty.
pub fn parse_param(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        Some(_) => Err(format!("empty parameter name in '{}'", arg)),
        None => Err(format!("expected KEY=VALUE, got '{}'", arg)),
    }
}
