use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Body sent to token endpoints that take credentials as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct JsonTokenRequest<'a> {
    pub code: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
    pub response_type: &'a str,
    pub grant_type: &'a str,
}

/// Playlist object returned by `GET /playlists/{id}`.
///
/// Only the embedded track page is read. After [`crate::spotify::get_playlist`]
/// returns, `tracks.items` holds every page and `tracks.next` is `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub tracks: PlaylistTracks,
}

/// One page of playlist items. `next` links the following page, if any.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTracks {
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Playlist entry wrapping the track it points at.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    // null for removed or local-only entries
    pub track: Option<PlaylistTrack>,
}

/// Track title and credited artists, in Spotify's order.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrack {
    pub name: String,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// Deezer search envelope. Results are ranked, best first.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<SearchTrack>,
}

/// One Deezer search result. Optional media links default to empty strings.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchTrack {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub preview: String,
    pub artist: SearchArtist,
    pub album: SearchAlbum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArtist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub picture_medium: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchAlbum {
    #[serde(default)]
    pub cover_medium: String,
}

/// Flat view of the best search match.
///
/// Returned as JSON by `/getTrack` and rendered as a table by the `search`
/// command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct TrackInfo {
    pub track_id: i64,
    pub artist_id: i64,
    pub artist_name: String,
    pub title: String,
    pub preview_link: String,
    pub artist_picture: String,
    pub album_picture: String,
}

impl From<&SearchTrack> for TrackInfo {
    fn from(track: &SearchTrack) -> Self {
        TrackInfo {
            track_id: track.id,
            artist_id: track.artist.id,
            artist_name: track.artist.name.clone(),
            title: track.title.clone(),
            preview_link: track.preview.clone(),
            artist_picture: track.artist.picture_medium.clone(),
            album_picture: track.album.cover_medium.clone(),
        }
    }
}
