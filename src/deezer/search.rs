use reqwest::{Client, Url};

use crate::{
    error::ServiceError,
    http,
    types::{SearchResponse, TrackInfo},
    utils,
};

/// Searches Deezer for a track and returns the first match.
///
/// Sends an anonymous `GET {search_url}?q={query}`. The provider's ordering is
/// taken as-is: the first element of `data` is the match.
///
/// # Errors
///
/// - [`ServiceError::BadRequest`] for an empty query, before any request
/// - [`ServiceError::RequestConstruction`] if the search URL is invalid
/// - [`ServiceError::UpstreamRequest`] on transport failure
/// - [`ServiceError::UpstreamStatus`] for a non-success status
/// - [`ServiceError::MalformedResponse`] if the payload has no `data` sequence
/// - [`ServiceError::NoResults`] if `data` is empty
///
/// # Example
///
/// ```
/// let track = search_track(&client, "https://api.deezer.com/search", "daft punk one more time").await?;
/// println!("{} - {}", track.artist_name, track.title);
/// ```
pub async fn search_track(
    client: &Client,
    search_url: &str,
    query: &str,
) -> Result<TrackInfo, ServiceError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ServiceError::BadRequest(
            "search query must not be empty".to_string(),
        ));
    }

    let mut url = Url::parse(search_url)
        .map_err(|e| ServiceError::RequestConstruction(format!("{search_url:?}: {e}")))?;
    url.query_pairs_mut().append_pair("q", query);

    let response = client.get(url).send().await?;
    let results: SearchResponse = http::read_json(response).await?;

    utils::first_track_info(&results.data).ok_or_else(|| ServiceError::NoResults(query.to_string()))
}
