//! Configuration management for the Last.fm signing proxy.
//!
//! This module loads configuration values from environment variables and `.env`
//! files once at start-up and turns them into an explicit [`Config`] value. The
//! request pipeline never reads the process environment itself; every consumer
//! receives the `Config` it needs.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{
    env, fmt,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    path::PathBuf,
    str::FromStr,
};

use thiserror::Error;

/// Default Last.fm web service endpoint.
pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Default Last.fm web authentication page.
pub const DEFAULT_AUTH_URL: &str = "https://www.last.fm/api/auth/";

/// Default bind address of the proxy server.
pub const DEFAULT_SERVER_ADDRESS: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8888));

pub const ENV_API_KEY: &str = "LASTFM_API_KEY";
pub const ENV_API_SECRET: &str = "LASTFM_API_SECRET";
pub const ENV_API_URL: &str = "LASTFM_API_URL";
pub const ENV_AUTH_URL: &str = "LASTFM_AUTH_URL";
pub const ENV_SERVER_ADDRESS: &str = "SERVER_ADDRESS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Loads environment variables from `.env` files.
///
/// A `.env` file in the working directory is read first. Afterwards the file in
/// the platform-specific local data directory is read, creating the directory
/// when it does not exist yet:
/// - Linux: `~/.local/share/lfmproxy/.env`
/// - macOS: `~/Library/Application Support/lfmproxy/.env`
/// - Windows: `%LOCALAPPDATA%/lfmproxy/.env`
///
/// Variables that are already set are never overwritten, and a missing file is
/// not an error. Hosting platforms usually inject variables directly.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(format!("{}: {}", path.display(), e)),
    }
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lfmproxy/.env");
    path
}

/// Runtime configuration of the proxy.
///
/// Holds the Last.fm credentials together with the endpoints they are used
/// against. Built once, then cloned into whatever needs it. The values are read
/// only; nothing in the crate mutates a `Config` after construction.
#[derive(Clone)]
pub struct Config {
    /// Last.fm API key, injected into every outbound request.
    pub api_key: String,
    /// Shared secret used to sign requests. Never sent upstream or logged.
    pub api_secret: String,
    /// Base URL of the Last.fm web service.
    pub api_url: String,
    /// Base URL of the Last.fm web authentication page.
    pub auth_url: String,
    /// Address the proxy server binds to.
    pub server_address: SocketAddr,
}

impl Config {
    /// Creates a configuration with the given credentials and default endpoints.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            server_address: DEFAULT_SERVER_ADDRESS,
        }
    }

    /// Points the proxy at another Last.fm web service endpoint, e.g. a local
    /// stand-in during tests.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Replaces the base of the URL returned by the `getLoginUrl` action.
    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = auth_url.into();
        self
    }

    /// Replaces the bind address, as `lfmproxy serve --address` does.
    pub fn with_server_address(mut self, server_address: SocketAddr) -> Self {
        self.server_address = server_address;
        self
    }

    /// Builds the configuration from the process environment.
    ///
    /// `LASTFM_API_KEY` and `LASTFM_API_SECRET` are required. `LASTFM_API_URL`,
    /// `LASTFM_AUTH_URL` and `SERVER_ADDRESS` fall back to their defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] when a required variable is unset or empty
    /// - [`ConfigError::Invalid`] when `SERVER_ADDRESS` is not a socket address
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// [`Config::from_env`] delegates here with [`std::env::var`]; tests pass a
    /// closure over a map instead of touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = value(ENV_API_KEY).ok_or(ConfigError::Missing(ENV_API_KEY))?;
        let api_secret = value(ENV_API_SECRET).ok_or(ConfigError::Missing(ENV_API_SECRET))?;
        let api_url = value(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let auth_url = value(ENV_AUTH_URL).unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());

        let server_address = match value(ENV_SERVER_ADDRESS) {
            Some(addr) => SocketAddr::from_str(&addr)
                .map_err(|_| ConfigError::Invalid(ENV_SERVER_ADDRESS))?,
            None => DEFAULT_SERVER_ADDRESS,
        };

        Ok(Self {
            api_key,
            api_secret,
            api_url,
            auth_url,
            server_address,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .field("server_address", &self.server_address)
            .finish()
    }
}
