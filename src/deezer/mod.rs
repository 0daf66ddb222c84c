//! Deezer public search API. No authentication is needed.

mod search;

pub use search::search_track;
