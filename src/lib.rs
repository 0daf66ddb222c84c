//! tunebridge library
//!
//! This library implements a small HTTP service that runs OAuth 2.0
//! authorization-code exchanges against Spotify and Genius and reshapes
//! Spotify playlists and Deezer search results into simple, flat structures.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the service routes
//! - `cli` - Command-line entry points (`serve`, `search`)
//! - `config` - Environment loading and typed configuration
//! - `deezer` - Anonymous track search
//! - `error` - The service error type and its HTTP rendering
//! - `http` - Shared outbound HTTP client and response decoding
//! - `management` - In-memory OAuth session state
//! - `oauth` - Authorization URL construction and code exchange
//! - `provider` - Per-provider OAuth configuration records
//! - `server` - Router assembly and server startup
//! - `spotify` - Spotify playlist retrieval
//! - `types` - Provider payloads and projected records
//! - `utils` - State generation and response projection

pub mod api;
pub mod cli;
pub mod config;
pub mod deezer;
pub mod error;
pub mod http;
pub mod management;
pub mod oauth;
pub mod provider;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for command-level operations that may fail.
///
/// Library operations return [`error::ServiceError`]; this alias is used where
/// heterogeneous errors (I/O, configuration, server) meet at the CLI boundary.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Redirecting to {} authorization", provider);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Stored {} access token", provider);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for failures the service cannot start without, such as missing
/// credentials or an address that cannot be bound. The expression has type `!`,
/// so it can stand in any match arm.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Token exchange failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
