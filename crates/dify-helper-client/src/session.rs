//! Authenticated session against the console API.

use std::fmt;

use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ClientError;

const CONSOLE_PREFIX: &str = "/console/api";
const PUBLIC_PREFIX: &str = "/api";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    access_token: Option<String>,
}

/// Base URL, optional bearer token and transport handle.
///
/// Holds at most one token. Logging in again replaces it.
#[derive(Clone)]
pub struct Session {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Create a session that reuses an existing transport.
    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/console/api{path}`
    pub fn console_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, CONSOLE_PREFIX, path)
    }

    /// `{base}/api{path}`
    pub fn public_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, PUBLIC_PREFIX, path)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Attach a token obtained elsewhere.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Exchange credentials for an access token and keep it for later calls.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, ClientError> {
        let url = self.console_url("/login");
        info!("Logging in to {}", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let body = decode(response).await?;
        let parsed: LoginResponse =
            serde_json::from_value(body).map_err(|e| ClientError::Parse(e.to_string()))?;
        let token = parsed
            .data
            .and_then(|d| d.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ClientError::Parse("login response did not contain data.access_token".to_string())
            })?;

        self.token = Some(token.clone());
        Ok(token)
    }

    /// Issue an authenticated call under `/console/api`.
    pub async fn invoke(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.request(method, path, body).await
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.request::<Value>(Method::GET, path, None).await
    }

    pub(crate) async fn post<B>(&self, path: &str, body: &B) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<B>(&self, path: &str, body: &B) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.request::<Value>(Method::DELETE, path, None).await
    }

    async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.console_url(path);
        debug!("{} {}", method, url);

        let mut builder = self.authorized(self.http.request(method, &url))?;
        if let Some(body) = body {
            builder = builder.json(body);
        }

        send(builder).await
    }

    /// Attach the bearer token, or refuse before any network I/O.
    pub(crate) fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(builder.bearer_auth(token))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Send a request and decode the JSON body of a 2xx response.
pub(crate) async fn send(builder: RequestBuilder) -> Result<Value, ClientError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;
    decode(response).await
}

async fn decode(response: Response) -> Result<Value, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
