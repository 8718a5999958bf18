//! Session-independent handlers: health, login and public chat.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use dify_helper_client::ChatRequest;

use crate::error::ApiError;
use crate::http::extract::{required, JsonBody};
use crate::state::AppState;

/// Service name reported by `/health`.
pub const SERVICE_NAME: &str = "dify-api-helper";

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub authenticated: bool,
}

/// Body of `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// Remote instance to log in to. Defaults to the configured base URL.
    pub base_url: Option<String>,
}

/// Response of a successful login. The token stays server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub app_key: Option<String>,
    pub query: Option<String>,
    pub user: Option<String>,
    pub conversation_id: Option<String>,
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        authenticated: state.is_authenticated(),
    })
}

/// Log in and replace the shared session.
///
/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (email, password) = match (
        req.email.filter(|e| !e.is_empty()),
        req.password.filter(|p| !p.is_empty()),
    ) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::MissingCredentials),
    };

    let base_url = req
        .base_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| state.default_base_url().to_string());

    let mut client = state.new_client(&base_url);
    client
        .login(&email, &password)
        .await
        .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

    info!("Session established against {}", client.base_url());
    state.set_client(client);

    Ok(Json(LoginResponse {
        success: true,
        message: "Logged in successfully".to_string(),
    }))
}

/// Send a chat message with an app key. Uses the session's base URL when
/// logged in, the default otherwise.
///
/// POST /chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<ChatBody>,
) -> Result<Json<Value>, ApiError> {
    let app_key = required(body.app_key, "app_key")?;
    let query = required(body.query, "query")?;

    let request = ChatRequest::new(query)
        .with_user(body.user.filter(|u| !u.is_empty()).unwrap_or_else(|| "user".to_string()))
        .with_conversation(body.conversation_id);

    let client = state.new_client(&state.base_url());
    Ok(Json(client.chat_completion(&app_key, &request).await?))
}
