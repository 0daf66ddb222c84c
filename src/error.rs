use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::provider::Provider;

/// Every way a request to the service can fail.
///
/// Errors are rendered at the handler boundary as a plain-text body with the
/// status from [`ServiceError::status_code`]. Nothing is retried.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Required caller input is missing or empty.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The callback `state` is unknown, expired, or not bound to this browser.
    #[error("invalid or expired OAuth state")]
    InvalidState,

    /// No usable access token for the provider a resource needs.
    #[error("not authenticated with {0}, visit /login first")]
    NotAuthenticated(Provider),

    /// A token endpoint (or a resource endpoint with 401) rejected the request.
    #[error("upstream auth error: status {status}, response: {body}")]
    UpstreamAuth { status: u16, body: String },

    /// A resource endpoint answered with a non-success status.
    #[error("upstream returned status {status}, response: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The HTTP call itself failed (connect, timeout, reading the body).
    #[error("upstream request failed: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    /// The payload was not JSON or lacked an expected field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A search produced an empty result sequence.
    #[error("no results for \"{0}\"")]
    NoResults(String),

    /// An outbound URL could not be built.
    #[error("failed to build request: {0}")]
    RequestConstruction(String),
}

impl ServiceError {
    /// HTTP status used when the error reaches a client.
    ///
    /// Caller mistakes are 400. A missing token is 401. An empty search is
    /// 404. A URL that cannot be built is 500. Anything the upstream did wrong
    /// is 502.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) | ServiceError::InvalidState => StatusCode::BAD_REQUEST,
            ServiceError::NotAuthenticated(_) => StatusCode::UNAUTHORIZED,
            ServiceError::NoResults(_) => StatusCode::NOT_FOUND,
            ServiceError::RequestConstruction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::UpstreamAuth { .. }
            | ServiceError::UpstreamStatus { .. }
            | ServiceError::UpstreamRequest(_)
            | ServiceError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
