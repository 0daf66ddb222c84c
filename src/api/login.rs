use axum::{
    Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{api::cookie, info, oauth, provider::Provider, server::AppState, warning};

pub async fn login_spotify(Extension(state): Extension<AppState>) -> Response {
    login(&state, Provider::Spotify).await
}

pub async fn login_genius(Extension(state): Extension<AppState>) -> Response {
    login(&state, Provider::Genius).await
}

/// Starts the authorization-code flow: issues a state, binds it to the
/// browser with a cookie and answers 302 to the provider's authorize page.
async fn login(state: &AppState, provider: Provider) -> Response {
    let oauth_state = state.sessions.begin_authorization(provider).await;

    let url = match oauth::authorization_url(state.config.provider(provider), &oauth_state) {
        Ok(url) => url,
        Err(e) => {
            warning!("{}", e);
            return e.into_response();
        }
    };

    info!("Redirecting to {} authorization", provider);
    let set_cookie = cookie::set_state_cookie(
        provider,
        &oauth_state,
        state.sessions.state_ttl().num_seconds(),
    );

    (
        StatusCode::FOUND,
        [
            (header::LOCATION, url.to_string()),
            (header::SET_COOKIE, set_cookie),
        ],
    )
        .into_response()
}
