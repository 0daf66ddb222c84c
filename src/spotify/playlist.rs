use std::collections::HashSet;

use reqwest::{Client, Url};

use crate::{
    error::ServiceError,
    http,
    types::{Playlist, PlaylistTracks},
};

/// Most follow-up pages fetched for one playlist. Spotify caps playlists at
/// 10,000 items and pages hold up to 100.
pub const MAX_PLAYLIST_PAGES: usize = 100;

/// Retrieves a playlist and all of its track pages from the Spotify Web API.
///
/// Issues `GET {api_url}/playlists/{id}` with the bearer token. Spotify embeds
/// at most one page of items in the playlist object; the `tracks.next` link is
/// followed until it is null and every page is appended in order, so the
/// returned playlist holds the complete track list.
///
/// A `next` link is only followed if it has the same origin as `api_url`, has
/// not been visited yet, and the page count stays within
/// [`MAX_PLAYLIST_PAGES`]. The bearer token never leaves the API origin.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Web API base, e.g. `https://api.spotify.com/v1`
/// * `token` - Bearer access token
/// * `playlist_id` - Spotify playlist id
///
/// # Errors
///
/// - [`ServiceError::BadRequest`] for an empty playlist id, before any request
/// - [`ServiceError::RequestConstruction`] if the URL cannot be built
/// - [`ServiceError::UpstreamRequest`] on transport failure
/// - [`ServiceError::UpstreamAuth`] when Spotify rejects the token (401)
/// - [`ServiceError::UpstreamStatus`] for other non-success statuses
/// - [`ServiceError::MalformedResponse`] if a page does not parse, or the
///   `next` links leave the API origin, repeat, or exceed the page limit
///
/// # Example
///
/// ```
/// let playlist = get_playlist(&client, "https://api.spotify.com/v1", &token, "37i9dQZF1DXcBWIGoYBM5M").await?;
/// println!("{} tracks", playlist.tracks.items.len());
/// ```
pub async fn get_playlist(
    client: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
) -> Result<Playlist, ServiceError> {
    let playlist_id = playlist_id.trim();
    if playlist_id.is_empty() {
        return Err(ServiceError::BadRequest(
            "you need to provide a playlist ID".to_string(),
        ));
    }

    let url = playlist_url(api_url, playlist_id)?;
    let mut seen = HashSet::from([url.to_string()]);
    let response = client.get(url.clone()).bearer_auth(token).send().await?;
    let mut playlist: Playlist = http::read_json(response).await?;

    let mut next = playlist.tracks.next.take();
    while let Some(link) = next {
        if seen.len() > MAX_PLAYLIST_PAGES {
            return Err(ServiceError::MalformedResponse(format!(
                "playlist {playlist_id} has more than {MAX_PLAYLIST_PAGES} pages"
            )));
        }
        let next_url = next_page_url(&url, &link, &mut seen)?;
        let response = client.get(next_url).bearer_auth(token).send().await?;
        let page: PlaylistTracks = http::read_json(response).await?;
        playlist.tracks.items.extend(page.items);
        next = page.next;
    }

    Ok(playlist)
}

/// Validates a `next` link against the origin of the first request.
fn next_page_url(
    first: &Url,
    link: &str,
    seen: &mut HashSet<String>,
) -> Result<Url, ServiceError> {
    let url = Url::parse(link)
        .map_err(|e| ServiceError::MalformedResponse(format!("invalid next link {link:?}: {e}")))?;
    if url.origin() != first.origin() {
        return Err(ServiceError::MalformedResponse(format!(
            "next link {link:?} leaves the API origin"
        )));
    }
    if !seen.insert(url.to_string()) {
        return Err(ServiceError::MalformedResponse(format!(
            "next link {link:?} was already visited"
        )));
    }
    Ok(url)
}

fn playlist_url(api_url: &str, playlist_id: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(api_url)
        .map_err(|e| ServiceError::RequestConstruction(format!("{api_url:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| {
            ServiceError::RequestConstruction(format!("{api_url:?} cannot be a base URL"))
        })?
        .pop_if_empty()
        .push("playlists")
        .push(playlist_id);
    Ok(url)
}
