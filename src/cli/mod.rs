//! # CLI Module
//!
//! Command implementations for the `tunebridge` binary.
//!
//! - [`serve`] - Runs the HTTP service (login, callback, playlist and track routes)
//! - [`search`] - One-off anonymous Deezer track search rendered as a table
//!
//! Both commands report through the crate's console macros. Startup failures
//! (missing credentials, unbindable address) terminate the process.

mod search;
mod serve;

pub use search::search;
pub use serve::serve;
