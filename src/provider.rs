//! Per-provider OAuth configuration.
//!
//! Both OAuth providers run the same authorization-code flow. What differs
//! between them is captured here: endpoints, scope, and how the client
//! credentials travel to the token endpoint.

use std::fmt;

use serde::Serialize;

pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_SCOPE: &str = "user-read-private user-read-email";

pub const GENIUS_AUTH_URL: &str = "https://api.genius.com/oauth/authorize";
pub const GENIUS_TOKEN_URL: &str = "https://api.genius.com/oauth/token";
pub const GENIUS_SCOPE: &str = "me";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Spotify,
    Genius,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Spotify, Provider::Genius];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Spotify => "spotify",
            Provider::Genius => "genius",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How client credentials are presented to the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStyle {
    /// Form-encoded body, credentials in an `Authorization: Basic` header.
    BasicAuthForm,
    /// JSON body carrying client id, secret and response type inline.
    JsonBody,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub authorize_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub credentials: CredentialStyle,
}

impl ProviderConfig {
    /// Spotify with its public endpoints and default scope.
    pub fn spotify(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            provider: Provider::Spotify,
            authorize_url: SPOTIFY_AUTH_URL.to_string(),
            token_url: SPOTIFY_TOKEN_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: SPOTIFY_SCOPE.to_string(),
            credentials: CredentialStyle::BasicAuthForm,
        }
    }

    /// Genius with its public endpoints and default scope.
    pub fn genius(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            provider: Provider::Genius,
            authorize_url: GENIUS_AUTH_URL.to_string(),
            token_url: GENIUS_TOKEN_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: GENIUS_SCOPE.to_string(),
            credentials: CredentialStyle::JsonBody,
        }
    }
}
