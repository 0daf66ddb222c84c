use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header};
use serde_json::Value;

use crate::{
    error::ServiceError,
    provider::{CredentialStyle, ProviderConfig},
    types::JsonTokenRequest,
};

/// Exchanges an authorization code for the provider's bearer access token.
///
/// Completes the authorization-code flow with a server-to-server POST to the
/// provider's token endpoint. How the client credentials are sent depends on
/// [`CredentialStyle`]:
///
/// - `BasicAuthForm`: form body with `code`, `redirect_uri` and
///   `grant_type=authorization_code`, plus an
///   `Authorization: Basic base64(client_id:client_secret)` header.
/// - `JsonBody`: JSON body with the same fields plus `client_id`,
///   `client_secret` and `response_type=code`.
///
/// # Errors
///
/// - [`ServiceError::BadRequest`] if `code` is empty; no request is sent.
/// - [`ServiceError::UpstreamRequest`] if the endpoint cannot be reached.
/// - [`ServiceError::UpstreamAuth`] for any non-2xx answer, with status and body.
/// - [`ServiceError::MalformedResponse`] if the body is not JSON or has no
///   string `access_token`.
///
/// # Example
///
/// ```
/// let token = exchange_code(&client, &config.spotify, "AQA...code").await?;
/// ```
pub async fn exchange_code(
    client: &Client,
    provider: &ProviderConfig,
    code: &str,
) -> Result<String, ServiceError> {
    if code.trim().is_empty() {
        return Err(ServiceError::BadRequest(
            "authorization code must not be empty".to_string(),
        ));
    }

    let request = match provider.credentials {
        CredentialStyle::BasicAuthForm => {
            let credentials =
                STANDARD.encode(format!("{}:{}", provider.client_id, provider.client_secret));
            client
                .post(&provider.token_url)
                .header(header::AUTHORIZATION, format!("Basic {credentials}"))
                .form(&[
                    ("code", code),
                    ("redirect_uri", provider.redirect_uri.as_str()),
                    ("grant_type", "authorization_code"),
                ])
        }
        CredentialStyle::JsonBody => client.post(&provider.token_url).json(&JsonTokenRequest {
            code,
            client_id: &provider.client_id,
            client_secret: &provider.client_secret,
            redirect_uri: &provider.redirect_uri,
            response_type: "code",
            grant_type: "authorization_code",
        }),
    };

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ServiceError::UpstreamAuth {
            status: status.as_u16(),
            body,
        });
    }

    let json: Value = serde_json::from_str(&body).map_err(|e| {
        ServiceError::MalformedResponse(format!("{} token response: {}", provider.provider, e))
    })?;

    json.get("access_token")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ServiceError::MalformedResponse(format!(
                "{} token response has no access_token",
                provider.provider
            ))
        })
}
