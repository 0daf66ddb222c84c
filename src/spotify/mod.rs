//! # Spotify Module
//!
//! Spotify Web API resources used by the service. Authentication lives in
//! [`crate::oauth`]; this module only needs a bearer token.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{playlist_id}` - Playlist with its first page of items
//! - `GET /playlists/{playlist_id}/tracks?offset=..` - Further pages, reached
//!   through the `next` link of the previous page

mod playlist;

pub use playlist::{MAX_PLAYLIST_PAGES, get_playlist};
