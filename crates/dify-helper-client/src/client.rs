//! Client wrapper around an authenticated [`Session`].

use reqwest::Method;
use serde_json::Value;

use crate::error::ClientError;
use crate::session::Session;

/// One method per remote operation.
///
/// Operation methods live next to the resource they touch
/// (`apps.rs`, `datasets.rs`, `public.rs`).
#[derive(Debug, Clone)]
pub struct DifyClient {
    pub(crate) session: Session,
}

impl DifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            session: Session::new(base_url),
        }
    }

    pub fn from_session(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        self.session.base_url()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Log in and keep the returned access token.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String, ClientError> {
        self.session.login(email, password).await
    }

    /// Use a token obtained elsewhere instead of logging in.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.session.set_token(token);
    }

    /// Raw authenticated call under `/console/api`.
    pub async fn invoke(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.session.invoke(method, path, body).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
