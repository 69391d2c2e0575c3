//! Client configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the chat client.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the chat backend (e.g., "http://localhost:8080").
    pub api_base_url: String,

    /// HTTP request timeout in seconds.
    pub http_timeout_secs: u64,

    /// Poll interval for refreshing the message list (seconds).
    pub poll_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            http_timeout_secs: 30,
            poll_interval_secs: 3,
        }
    }
}
