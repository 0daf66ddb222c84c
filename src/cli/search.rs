use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::{Table, settings::Style};

use crate::{config, deezer, error, http, success, warning};

/// Searches Deezer from the command line and prints the match as a table.
pub async fn search(query: String) {
    let timeout = match config::http_timeout() {
        Ok(timeout) => timeout,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };
    let client = match http::build_client(timeout) {
        Ok(client) => client,
        Err(e) => error!("Cannot initialise HTTP client. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Searching for \"{query}\"..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = deezer::search_track(&client, &config::deezer_search_url(), &query).await;
    pb.finish_and_clear();

    match result {
        Ok(track) => {
            success!("Found {} - {}", track.artist_name, track.title);
            let mut table = Table::new([track]);
            table.with(Style::rounded());
            println!("{table}");
        }
        Err(e) => warning!("Search failed: {}", e),
    }
}
