use std::collections::HashMap;

use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};

use crate::{api::cookie, error::ServiceError, oauth, server::AppState, success, warning};

/// OAuth redirect target for every provider.
///
/// The pending `state` identifies which provider the browser is returning
/// from. The code is exchanged for a token, which is kept in the session
/// store and never sent back to the browser.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Extension(state): Extension<AppState>,
) -> Result<Response, ServiceError> {
    if let Some(reason) = params.get("error") {
        return Err(ServiceError::BadRequest(format!(
            "authorization was not granted: {reason}"
        )));
    }

    let code = match params.get("code").map(|c| c.trim()) {
        Some(code) if !code.is_empty() => code,
        _ => {
            return Err(ServiceError::BadRequest(
                "did not receive an authorization code".to_string(),
            ));
        }
    };

    let oauth_state = params
        .get("state")
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServiceError::BadRequest("did not receive a state".to_string()))?;

    let cookies = cookie::request_cookies(&headers);
    let provider = state
        .sessions
        .complete_authorization(oauth_state, |provider| {
            cookies.get(&cookie::state_cookie_name(provider)).cloned()
        })
        .await
        .inspect_err(|e| warning!("Rejected callback: {}", e))?;

    let token = oauth::exchange_code(&state.http, state.config.provider(provider), code)
        .await
        .inspect_err(|e| warning!("Token exchange with {} failed: {}", provider, e))?;

    state.sessions.store_token(provider, token).await;
    success!("Stored {} access token", provider);

    Ok((
        [(header::SET_COOKIE, cookie::clear_state_cookie(provider))],
        format!("Authenticated with {provider}. You can close this window."),
    )
        .into_response())
}
