use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, Query},
};

use crate::{
    deezer, error::ServiceError, provider::Provider, server::AppState, spotify, types::TrackInfo,
    utils, warning,
};

/// Lists a Spotify playlist as `"Artist1 Artist2 - Title"` lines.
///
/// A 401 from Spotify marks the stored token as invalidated so that later
/// requests ask for a new login instead of reusing it.
pub async fn get_playlist(
    Path(playlist_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<String, ServiceError> {
    if playlist_id.trim().is_empty() {
        return Err(missing_id());
    }

    let token = state.sessions.token(Provider::Spotify).await?;
    let result = spotify::get_playlist(
        &state.http,
        &state.config.spotify_api_url,
        &token,
        &playlist_id,
    )
    .await;

    let playlist = match result {
        Ok(playlist) => playlist,
        Err(e) => {
            if let ServiceError::UpstreamAuth { .. } = e {
                state.sessions.invalidate(Provider::Spotify).await;
            }
            warning!("Failed to fetch playlist {}: {}", playlist_id, e);
            return Err(e);
        }
    };

    Ok(utils::playlist_labels(&playlist)
        .iter()
        .map(|label| format!("{label}\n"))
        .collect())
}

pub async fn missing_playlist_id() -> ServiceError {
    missing_id()
}

/// Looks up the best Deezer match for `?search=`.
pub async fn get_track(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> Result<Json<TrackInfo>, ServiceError> {
    let query = params.get("search").map(String::as_str).unwrap_or_default();

    deezer::search_track(&state.http, &state.config.deezer_search_url, query)
        .await
        .map(Json)
        .inspect_err(|e| warning!("Track search for {:?} failed: {}", query, e))
}

fn missing_id() -> ServiceError {
    ServiceError::BadRequest("you need to provide a playlist ID".to_string())
}
