//! # API Module
//!
//! HTTP handlers for the tunebridge service.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login_spotify`], [`login_genius`] - Start the OAuth 2.0 authorization-code
//!   flow. Answer 302 to the provider with a fresh `state` and bind that state
//!   to the browser with a cookie.
//! - [`callback`] - Shared redirect target. Verifies `state`, exchanges `code`
//!   for an access token and keeps the token in the session store.
//!
//! ### Resources
//!
//! - [`get_playlist`] - A Spotify playlist as `"Artist - Track"` lines.
//!   Requires a Spotify login.
//! - [`get_track`] - The first Deezer search match as JSON. Anonymous.
//!
//! ### Monitoring
//!
//! - [`index`] - Static greeting.
//! - [`health`] - Version and per-provider authentication status.
//!
//! Failures are rendered by [`crate::error::ServiceError`] as plain text with
//! a matching status code.

mod callback;
mod cookie;
mod health;
mod login;
mod resources;

pub use callback::callback;
pub use cookie::{request_cookies, state_cookie_name};
pub use health::{health, index};
pub use login::{login_genius, login_spotify};
pub use resources::{get_playlist, get_track, missing_playlist_id};
