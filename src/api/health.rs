use axum::{Extension, response::Json};
use serde_json::{Map, Value, json};

use crate::{provider::Provider, server::AppState};

pub async fn index() -> &'static str {
    "tunebridge is running. Visit /login to connect Spotify."
}

pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    let mut providers = Map::new();
    for provider in Provider::ALL {
        let status = state.sessions.status(provider).await;
        let obtained_at = state
            .sessions
            .token_obtained_at(provider)
            .await
            .map(|t| t.to_rfc3339());
        providers.insert(
            provider.to_string(),
            json!({ "status": status, "token_obtained_at": obtained_at }),
        );
    }

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": providers,
    }))
}
