//! Client error types.

use thiserror::Error;
use uuid::Uuid;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in chat client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("key storage failed: {0}")]
    Storage(String),

    #[error("private key for user {user_id} not found — log in from the browser where you registered")]
    PrivateKeyNotFound { user_id: Uuid },

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("no user is logged in")]
    NotLoggedIn,

    #[error("crypto error: {0}")]
    Crypto(#[from] cipherchat_crypto::CryptoError),
}
