use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use reqwest::Client;
use tokio::net::TcpListener;

use crate::{
    Res, api,
    config::Config,
    error::ServiceError,
    http,
    management::SessionStore,
};

/// Everything a handler needs: configuration, the outbound client and the
/// session store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: Client,
    pub sessions: SessionStore,
}

impl AppState {
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        let http = http::build_client(config.http_timeout)?;
        let sessions = SessionStore::new(config.state_ttl);
        Ok(Self {
            config: Arc::new(config),
            http,
            sessions,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login", get(api::login_spotify))
        .route("/loginSpotify", get(api::login_spotify))
        .route("/loginGenius", get(api::login_genius))
        .route("/callback", get(api::callback))
        .route("/getPlaylist", get(api::missing_playlist_id))
        .route("/getPlaylist/", get(api::missing_playlist_id))
        .route("/getPlaylist/{id}", get(api::get_playlist))
        .route("/getTrack", get(api::get_track))
        .layer(Extension(state))
}

/// Binds the configured address.
///
/// # Errors
///
/// Fails if the address does not parse or cannot be bound.
pub async fn bind(address: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| format!("Failed to parse server address {address:?}: {e}"))?;
    let listener = TcpListener::bind(&addr).await?;
    Ok(listener)
}

/// Serves the router on `listener` until Ctrl-C.
///
/// # Errors
///
/// Fails if the server stops with an I/O error.
pub async fn start_api_server(listener: TcpListener, state: AppState) -> Res<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
