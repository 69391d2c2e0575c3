//! Session controller: registration, login, sending, and message viewing.
//!
//! Owns every piece of mutable client state explicitly — the user directory
//! cache, the session plaintext cache, and the current identity — so nothing
//! crypto-adjacent lives in ambient globals.

use crate::api_client::ChatApiClient;
use crate::error::{ClientError, ClientResult};
use crate::key_store::{KeyValueStore, MemoryStore, PrivateKeyStore};
use crate::policy::{evaluate, Disclosure, PlaintextCache};
use crate::types::{Message, NewMessageRequest, RegisterRequest, SessionUser, UserRecord};
use cipherchat_crypto::{
    encrypt_message, export_private, export_public, generate_keypair, import_private,
    import_public, DecryptionKey,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

const SESSION_USER_KEY: &str = "current_user";

/// Top-level chat session.
///
/// `S` is the durable key-value medium holding private keys (a JSON file in
/// production, memory in tests). The identity cache always lives in a
/// volatile [`MemoryStore`], the session-storage analogue.
pub struct ChatSession<S: KeyValueStore> {
    api: Arc<ChatApiClient>,
    keys: PrivateKeyStore<S>,
    session_store: MemoryStore,
    current_user: Option<SessionUser>,
    /// Imported at login/registration; decryption capability for this session.
    private_key: Option<DecryptionKey>,
    /// Read-only cached copy of the backend user directory.
    directory: HashMap<Uuid, UserRecord>,
    /// Plaintext of messages authored this session, keyed by message id.
    plaintext_cache: PlaintextCache,
}

impl<S: KeyValueStore> ChatSession<S> {
    pub fn new(api: Arc<ChatApiClient>, key_store: S) -> Self {
        Self {
            api,
            keys: PrivateKeyStore::new(key_store),
            session_store: MemoryStore::new(),
            current_user: None,
            private_key: None,
            directory: HashMap::new(),
            plaintext_cache: HashMap::new(),
        }
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current_user.as_ref()
    }

    /// Registers a new user: generates a keypair, publishes the public half,
    /// persists the private half under the new user's id.
    ///
    /// Any failure aborts the flow: a user whose private key could not be
    /// stored would be permanently unable to read their messages.
    pub async fn register(&mut self, username: &str, password: &str) -> ClientResult<SessionUser> {
        let keypair = generate_keypair()?;
        let public_key = export_public(&keypair.public)?;
        let private_key = export_private(&keypair.secret)?;

        let record = self
            .api
            .register_user(&RegisterRequest {
                username: username.to_string(),
                public_key,
                secret_key: password.to_string(),
            })
            .await?;

        self.keys.save(record.id, &private_key)?;
        info!("registered user {} ({})", record.username, record.id);

        let user = SessionUser {
            id: record.id,
            username: record.username.clone(),
            public_key: record.public_key.clone(),
        };
        self.open_session(user.clone(), keypair.secret)?;
        self.directory.insert(record.id, record);
        Ok(user)
    }

    /// Logs in an existing user.
    ///
    /// Succeeds only where the private key was stored at registration time;
    /// elsewhere it fails with [`ClientError::PrivateKeyNotFound`] and its
    /// actionable message.
    pub async fn login(&mut self, username: &str) -> ClientResult<SessionUser> {
        let record = self
            .api
            .find_user(username)
            .await?
            .ok_or_else(|| ClientError::UserNotFound(username.to_string()))?;

        let serialized = self
            .keys
            .load(record.id)?
            .ok_or(ClientError::PrivateKeyNotFound { user_id: record.id })?;

        // Import validates the stored material before the session opens
        let key = import_private(&serialized)?;
        debug!("private key for {} imported", record.id);

        let user = SessionUser {
            id: record.id,
            username: record.username.clone(),
            public_key: record.public_key.clone(),
        };
        self.open_session(user.clone(), key)?;
        self.directory.insert(record.id, record);
        Ok(user)
    }

    /// Encrypts and sends a private message, or posts a broadcast in clear.
    ///
    /// For private messages the plaintext is recorded in the session cache
    /// under the stored message's id — the sender cannot decrypt its own
    /// RSA-OAEP output later.
    pub async fn send_message(
        &mut self,
        recipient_id: Option<Uuid>,
        text: &str,
    ) -> ClientResult<Message> {
        let sender = self.current_user.as_ref().ok_or(ClientError::NotLoggedIn)?;
        let sender_id = sender.id;

        let body = match recipient_id {
            None => text.to_string(),
            Some(recipient) => {
                let record = self.resolve_user(recipient).await?;
                let key = import_public(&record.public_key)?;
                encrypt_message(text, &key)?
            }
        };

        let message = self
            .api
            .post_message(&NewMessageRequest {
                ciphertext: body,
                sender_id,
                recipient_id,
            })
            .await?;

        if recipient_id.is_some() {
            self.plaintext_cache
                .insert(message.id, text.to_string());
        }
        debug!("sent message {} from {}", message.id, sender_id);
        Ok(message)
    }

    /// Applies the disclosure policy across a message list.
    ///
    /// Outcomes align with the input by index. Per-message failures degrade
    /// to placeholders inside [`evaluate`]; the pass itself never fails.
    pub fn view_messages(&self, messages: &[Message]) -> ClientResult<Vec<Disclosure>> {
        let viewer = self.current_user.as_ref().ok_or(ClientError::NotLoggedIn)?;
        Ok(messages
            .iter()
            .map(|m| evaluate(m, viewer.id, self.private_key.as_ref(), &self.plaintext_cache))
            .collect())
    }

    /// Refreshes the directory cache from the backend.
    pub async fn refresh_directory(&mut self) -> ClientResult<()> {
        let users = self.api.list_users().await?;
        debug!("directory refreshed: {} users", users.len());
        self.directory = users.into_iter().map(|u| (u.id, u)).collect();
        Ok(())
    }

    /// Directory lookup, refreshing once on a cache miss.
    async fn resolve_user(&mut self, user_id: Uuid) -> ClientResult<UserRecord> {
        if !self.directory.contains_key(&user_id) {
            self.refresh_directory().await?;
        }
        self.directory
            .get(&user_id)
            .cloned()
            .ok_or_else(|| ClientError::UserNotFound(user_id.to_string()))
    }

    /// Ends the session. The durable private key stays put — it is what
    /// makes the next login on this client possible.
    pub fn logout(&mut self) {
        if let Err(e) = self.session_store.remove(SESSION_USER_KEY) {
            warn!("failed to clear session store: {e}");
        }
        self.current_user = None;
        self.private_key = None;
        self.plaintext_cache.clear();
    }

    fn open_session(&mut self, user: SessionUser, key: DecryptionKey) -> ClientResult<()> {
        self.session_store
            .set(SESSION_USER_KEY, &serde_json::to_string(&user)?)?;
        self.current_user = Some(user);
        self.private_key = Some(key);
        Ok(())
    }
}
