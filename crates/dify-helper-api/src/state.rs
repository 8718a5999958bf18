//! Application state.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use dify_helper_client::{DifyClient, Session};

/// State shared by every handler.
///
/// Holds the one logged-in client. Login swaps it wholesale; handlers clone
/// the `Arc` and drop the lock before any network I/O.
pub struct AppState {
    default_base_url: String,
    http: reqwest::Client,
    session: RwLock<Option<Arc<DifyClient>>>,
    start_time: Instant,
}

impl AppState {
    pub fn new(default_base_url: impl Into<String>) -> Self {
        Self {
            default_base_url: default_base_url.into(),
            http: reqwest::Client::new(),
            session: RwLock::new(None),
            start_time: Instant::now(),
        }
    }

    /// Base URL used when a login request names none.
    pub fn default_base_url(&self) -> &str {
        &self.default_base_url
    }

    /// Fresh, unauthenticated client sharing this state's connection pool.
    pub fn new_client(&self, base_url: &str) -> DifyClient {
        DifyClient::from_session(Session::with_http(base_url, self.http.clone()))
    }

    /// Current logged-in client, if any.
    pub fn client(&self) -> Option<Arc<DifyClient>> {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Replace the session. Last writer wins.
    pub fn set_client(&self, client: DifyClient) {
        *self.session.write() = Some(Arc::new(client));
    }

    /// Base URL of the current session, else the default.
    pub fn base_url(&self) -> String {
        self.client()
            .map(|c| c.base_url().to_string())
            .unwrap_or_else(|| self.default_base_url.clone())
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_no_session() {
        let state = AppState::new("https://dify.example.com");
        assert!(!state.is_authenticated());
        assert!(state.client().is_none());
        assert_eq!(state.default_base_url(), "https://dify.example.com");
        assert_eq!(state.base_url(), "https://dify.example.com");
    }

    #[test]
    fn test_set_client_replaces_session() {
        let state = AppState::new("https://default.example.com");

        let mut first = state.new_client("https://first.example.com");
        first.set_token("one");
        state.set_client(first);
        assert_eq!(state.base_url(), "https://first.example.com");

        let mut second = state.new_client("https://second.example.com/");
        second.set_token("two");
        state.set_client(second);

        let current = state.client().unwrap();
        assert_eq!(current.base_url(), "https://second.example.com");
        assert_eq!(current.session().token(), Some("two"));
    }

    #[test]
    fn test_new_client_is_unauthenticated() {
        let state = AppState::new("https://dify.example.com");
        let client = state.new_client("https://other.example.com");
        assert!(!client.is_authenticated());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_uptime() {
        let state = AppState::new("http://localhost");
        std::thread::sleep(Duration::from_millis(10));
        assert!(state.uptime().as_millis() >= 10);
    }
}
