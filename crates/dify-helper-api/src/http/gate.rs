//! Session gate for console routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, NOT_AUTHENTICATED};
use crate::state::AppState;

/// Reject with 401 until someone has logged in; otherwise hand the
/// session's client to the handler as an `Extension<Arc<DifyClient>>`.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.client() {
        Some(client) => {
            request.extensions_mut().insert(client);
            next.run(request).await
        }
        None => ApiError::Unauthorized(NOT_AUTHENTICATED.to_string()).into_response(),
    }
}
