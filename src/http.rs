use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the client shared by every outbound call.
///
/// The connect timeout is 5 seconds, or `timeout` if that is shorter. The
/// user agent is `tunebridge/<version>`.
///
/// # Arguments
///
/// * `timeout` - Total time allowed for each request
///
/// # Errors
///
/// Returns [`ServiceError::RequestConstruction`] if the TLS backend cannot be
/// initialised.
pub fn build_client(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ServiceError::RequestConstruction(e.to_string()))
}

/// Reads the body of a resource response and decodes it as `T`.
///
/// # Arguments
///
/// * `response` - Response from a resource endpoint
///
/// # Returns
///
/// The decoded payload.
///
/// # Errors
///
/// - [`ServiceError::UpstreamAuth`] on 401, with the raw body
/// - [`ServiceError::UpstreamStatus`] on any other non-success status
/// - [`ServiceError::UpstreamRequest`] if the body cannot be read
/// - [`ServiceError::MalformedResponse`] if the body is not valid for `T`
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.text().await?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(ServiceError::UpstreamAuth {
            status: status.as_u16(),
            body,
        });
    }
    if !status.is_success() {
        return Err(ServiceError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|e| ServiceError::MalformedResponse(e.to_string()))
}
