//! Last.fm Signing Proxy Library
//!
//! This library keeps a Last.fm API key and shared secret on the server while
//! browsers talk to the Last.fm web service through it. Requests arrive as query
//! strings or JSON bodies, get the API key injected, are signed when the Last.fm
//! method demands it and are forwarded as either a GET or a form-encoded POST.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the proxy, preflight and health endpoints
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded once from the environment and `.env` files
//! - `error` - Error taxonomy shared by every pipeline step
//! - `lastfm` - Last.fm request signing, login URLs and the upstream client
//! - `params` - The parameter set that travels through the pipeline
//! - `proxy` - The signing proxy pipeline itself
//! - `server` - Router assembly and the listening server
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use lfmproxy::{config::{self, Config}, server};
//!
//! #[tokio::main]
//! async fn main() -> lfmproxy::Res<()> {
//!     config::load_env().await?;
//!     let config = Config::from_env()?;
//!     server::start_api_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod params;
pub mod proxy;
pub mod server;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the edges of the application (binary, CLI commands, server start-up)
/// where errors of different kinds are only reported, never matched on. The
/// request pipeline itself uses [`error::ProxyError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal conditions such as missing credentials at start-up. Code
/// handling a single request must never call this; use [`warning!`] instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: upstream API errors, malformed requests and
/// transport failures are all reported through this macro.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
