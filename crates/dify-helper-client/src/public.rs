//! Public app API, authenticated with an app key instead of the session token.

use serde_json::Value;
use tracing::info;

use crate::client::DifyClient;
use crate::error::ClientError;
use crate::models::ChatRequest;
use crate::session::send;

impl DifyClient {
    /// Blocking chat message to the app owning `app_key`.
    pub async fn chat_completion(
        &self,
        app_key: &str,
        request: &ChatRequest,
    ) -> Result<Value, ClientError> {
        info!("Sending chat message as '{}'", request.user);
        let builder = self
            .session
            .http()
            .post(self.session.public_url("/chat-messages"))
            .bearer_auth(app_key)
            .json(request);
        send(builder).await
    }

    pub async fn get_conversations(&self, app_key: &str, user: &str) -> Result<Value, ClientError> {
        let builder = self
            .session
            .http()
            .get(self.session.public_url("/conversations"))
            .bearer_auth(app_key)
            .query(&[("user", user)]);
        send(builder).await
    }
}
