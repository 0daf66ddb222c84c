use rand::{Rng, distr::Alphanumeric};

use crate::types::{Playlist, PlaylistTrack, SearchTrack, TrackInfo};

/// Length of the `state` value sent with authorization requests.
pub const STATE_LENGTH: usize = 16;

/// Generates a random OAuth `state` value.
///
/// Uses the thread-local generator, which is a CSPRNG seeded from the OS.
///
/// # Arguments
///
/// * `length` - Number of characters to produce
///
/// # Returns
///
/// A string of `length` characters drawn from `[A-Za-z0-9]`.
///
/// # Example
///
/// ```
/// let state = generate_state(STATE_LENGTH);
/// assert_eq!(state.len(), 16);
/// ```
pub fn generate_state(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Formats one playlist track as a display label.
///
/// Every artist name is followed by a single space, then `"- "` and the
/// title. A track without artists renders as `"- Title"`.
///
/// # Arguments
///
/// * `track` - Track to format
///
/// # Returns
///
/// A label like `"Artist1 Artist2 - Title"`.
pub fn track_label(track: &PlaylistTrack) -> String {
    let mut label: String = track
        .artists
        .iter()
        .map(|artist| format!("{} ", artist.name))
        .collect();
    label.push_str("- ");
    label.push_str(&track.name);
    label
}

/// Projects a playlist into one label per track.
///
/// Entries whose track is null (removed or local-only items) are skipped.
///
/// # Arguments
///
/// * `playlist` - Playlist with all pages already merged
///
/// # Returns
///
/// Labels from [`track_label`], in playlist order.
pub fn playlist_labels(playlist: &Playlist) -> Vec<String> {
    playlist
        .tracks
        .items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .map(track_label)
        .collect()
}

/// Takes the first search result as the match.
///
/// # Arguments
///
/// * `results` - Ranked search results
///
/// # Returns
///
/// The flattened first result, or `None` when `results` is empty.
pub fn first_track_info(results: &[SearchTrack]) -> Option<TrackInfo> {
    results.first().map(TrackInfo::from)
}
