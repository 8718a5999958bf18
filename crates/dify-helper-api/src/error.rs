//! Front end error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use dify_helper_client::ClientError;

/// Message returned by every gated route while no session exists.
pub const NOT_AUTHENTICATED: &str = "Not authenticated. Call /login first";

/// Errors surfaced to HTTP callers as `{"error": <message>}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required body field is absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Login without email or password.
    #[error("Email and password required")]
    MissingCredentials,

    /// Body is not valid JSON for the endpoint.
    #[error("{0}")]
    BadRequest(String),

    /// No session, or login rejected.
    #[error("{0}")]
    Unauthorized(String),

    /// The remote call failed.
    #[error(transparent)]
    Upstream(#[from] ClientError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::MissingCredentials | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let remote_status = match &self {
            ApiError::Upstream(e) => e.status(),
            _ => None,
        };
        if status.is_server_error() {
            error!(?remote_status, "Request failed: {}", message);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), message);
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
