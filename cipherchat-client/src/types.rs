//! Wire types shared with the chat backend.

use chrono::{DateTime, Utc};
use cipherchat_crypto::SerializedKey;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user directory entry. Owned by the backend; the client holds a
/// read-only cached copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub public_key: SerializedKey,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A stored message. Immutable once created.
///
/// `recipient_id = None` is a broadcast on the global channel: the body is
/// stored in clear. Private messages carry RSA-OAEP ciphertext only the
/// recipient can open.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Option<Uuid>,
    pub ciphertext: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// Request body for `POST /users`.
///
/// `secret_key` carries the registration password verbatim; the backend
/// stores it as-is. Not a sound credential scheme — kept for wire
/// compatibility, never logged on this side.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub public_key: SerializedKey,
    pub secret_key: String,
}

/// Request body for `POST /messages`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageRequest {
    pub ciphertext: String,
    pub sender_id: Uuid,
    pub recipient_id: Option<Uuid>,
}

/// The logged-in identity cached for the current session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub public_key: SerializedKey,
}
