use std::collections::HashMap;

use axum::http::{HeaderMap, header};

use crate::provider::Provider;

pub fn state_cookie_name(provider: Provider) -> String {
    format!("tunebridge_state_{provider}")
}

/// `Set-Cookie` value binding a login attempt to the browser.
pub fn set_state_cookie(provider: Provider, state: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        state_cookie_name(provider),
        state,
        max_age_secs
    )
}

pub fn clear_state_cookie(provider: Provider) -> String {
    format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax",
        state_cookie_name(provider)
    )
}

/// Collects every `name=value` pair from the request's `Cookie` headers.
pub fn request_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}
