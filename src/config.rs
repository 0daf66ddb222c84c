//! Configuration management for tunebridge.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. Lookup order:
//! 1. Environment variables already set in the process (highest priority)
//! 2. `.env` in the local data directory (`tunebridge/.env`)
//! 3. `.env` in the current working directory
//! 4. Built-in defaults for endpoints, address and timeouts

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::provider::{Provider, ProviderConfig};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_DEEZER_SEARCH_URL: &str = "https://api.deezer.com/search";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STATE_TTL_SECS: u64 = 600;

/// Errors raised while resolving [`Config`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A numeric variable could not be parsed.
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Fully resolved service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub spotify: ProviderConfig,
    pub genius: ProviderConfig,
    pub spotify_api_url: String,
    pub deezer_search_url: String,
    pub http_timeout: Duration,
    pub state_ttl: Duration,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a client id, secret or redirect URI
    /// is absent, and [`ConfigError::InvalidNumber`] when a numeric setting
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut spotify = ProviderConfig::spotify(
            required("SPOTIFY_CLIENT_ID")?,
            required("SPOTIFY_CLIENT_SECRET")?,
            required("SPOTIFY_REDIRECT_URI")?,
        );
        override_with(&mut spotify.scope, "SPOTIFY_SCOPE");
        override_with(&mut spotify.authorize_url, "SPOTIFY_AUTH_URL");
        override_with(&mut spotify.token_url, "SPOTIFY_TOKEN_URL");

        let mut genius = ProviderConfig::genius(
            required("GENIUS_CLIENT_ID")?,
            required("GENIUS_CLIENT_SECRET")?,
            required("GENIUS_REDIRECT_URI")?,
        );
        override_with(&mut genius.authorize_url, "GENIUS_AUTH_URL");
        override_with(&mut genius.token_url, "GENIUS_TOKEN_URL");

        Ok(Self {
            server_address: server_addr(),
            spotify,
            genius,
            spotify_api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            deezer_search_url: deezer_search_url(),
            http_timeout: http_timeout()?,
            state_ttl: Duration::from_secs(seconds(
                "OAUTH_STATE_TTL_SECS",
                DEFAULT_STATE_TTL_SECS,
            )?),
        })
    }

    /// Returns the OAuth settings for `provider`.
    ///
    /// # Arguments
    ///
    /// * `provider` - Provider whose client credentials and endpoints are needed
    pub fn provider(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::Spotify => &self.spotify,
            Provider::Genius => &self.genius,
        }
    }
}

/// Loads environment variables from a `.env` file.
///
/// Creates the `tunebridge` directory in the platform-specific local data
/// directory if needed and loads `tunebridge/.env` from it. When that file
/// does not exist, `.env` in the working directory is tried instead. Having
/// neither file is fine as long as the variables are set in the environment.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("tunebridge/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
        return Ok(());
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Returns the address the HTTP service binds to, e.g. `127.0.0.1:3000`.
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Deezer search endpoint.
pub fn deezer_search_url() -> String {
    optional("DEEZER_SEARCH_URL", DEFAULT_DEEZER_SEARCH_URL)
}

/// Returns the timeout applied to every outbound HTTP request.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidNumber`] if `HTTP_TIMEOUT_SECS` is not a number.
pub fn http_timeout() -> Result<Duration, ConfigError> {
    seconds("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS).map(Duration::from_secs)
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn override_with(target: &mut String, name: &str) {
    if let Some(value) = env::var(name).ok().filter(|v| !v.trim().is_empty()) {
        *target = value;
    }
}

fn seconds(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value })
        }
        _ => Ok(default),
    }
}
