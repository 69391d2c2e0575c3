//! HTTP client for the chat backend.
//!
//! Two collaborator surfaces: the user directory (`/users`) and the message
//! store (`/messages`). Plain JSON over reqwest; the backend returns error
//! text in the body on 4xx, surfaced as [`ClientError::Api`].

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{Message, NewMessageRequest, RegisterRequest, UserRecord};
use reqwest::Client;
use tracing::debug;

/// HTTP client for the chat backend directory and message services.
pub struct ChatApiClient {
    client: Client,
    config: ClientConfig,
}

impl ChatApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self { client, config }
    }

    // ── User directory ──

    /// Fetches the full user directory.
    pub async fn list_users(&self) -> ClientResult<Vec<UserRecord>> {
        let url = format!("{}/users", self.config.api_base_url);
        let users = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ClientError::Api(e.to_string()))?
            .json()
            .await?;
        Ok(users)
    }

    /// Looks up a single user by username. `None` on 404.
    pub async fn find_user(&self, username: &str) -> ClientResult<Option<UserRecord>> {
        let url = format!("{}/users/username/{username}", self.config.api_base_url);
        let resp = self.client.get(&url).send().await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let user = resp
            .error_for_status()
            .map_err(|e| ClientError::Api(e.to_string()))?
            .json()
            .await?;
        Ok(Some(user))
    }

    /// Creates a user, publishing their public key to the directory.
    ///
    /// The backend answers non-2xx with a plain-text reason (e.g. username
    /// already taken), which becomes the `Api` error message.
    pub async fn register_user(&self, req: &RegisterRequest) -> ClientResult<UserRecord> {
        let url = format!("{}/users", self.config.api_base_url);
        let resp = self.client.post(&url).json(req).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api(format!(
                "user registration failed ({status}): {body}"
            )));
        }

        debug!("registered user {}", req.username);
        Ok(resp.json().await?)
    }

    // ── Message store ──

    /// Fetches the most recent messages.
    pub async fn recent_messages(&self) -> ClientResult<Vec<Message>> {
        let url = format!("{}/messages/recent", self.config.api_base_url);
        let messages = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ClientError::Api(e.to_string()))?
            .json()
            .await?;
        Ok(messages)
    }

    /// Stores a new message (ciphertext for private, clear for broadcast).
    pub async fn post_message(&self, req: &NewMessageRequest) -> ClientResult<Message> {
        let url = format!("{}/messages", self.config.api_base_url);
        let message = self
            .client
            .post(&url)
            .json(req)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ClientError::Api(e.to_string()))?
            .json()
            .await?;
        Ok(message)
    }
}
