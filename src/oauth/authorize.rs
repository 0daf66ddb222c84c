use reqwest::Url;

use crate::{error::ServiceError, provider::ProviderConfig};

/// Builds the provider's authorization URL for one login attempt.
///
/// Sets `response_type=code`, `client_id`, `scope`, `redirect_uri` and `state`
/// on the provider's authorize endpoint. Existing query parameters on the
/// endpoint are kept.
///
/// # Errors
///
/// Returns [`ServiceError::RequestConstruction`] if the configured authorize
/// endpoint is not a valid absolute URL.
///
/// # Example
///
/// ```
/// let provider = ProviderConfig::spotify("id", "secret", "http://127.0.0.1:3000/callback");
/// let url = authorization_url(&provider, "Ab3dEf6hIj9kLm2n")?;
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=id&...
/// ```
pub fn authorization_url(provider: &ProviderConfig, state: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(&provider.authorize_url).map_err(|e| {
        ServiceError::RequestConstruction(format!(
            "invalid {} authorize URL {:?}: {}",
            provider.provider, provider.authorize_url, e
        ))
    })?;

    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &provider.client_id)
        .append_pair("scope", &provider.scope)
        .append_pair("redirect_uri", &provider.redirect_uri)
        .append_pair("state", state);

    Ok(url)
}
