//! Durable private-key storage.
//!
//! The persistence medium is abstracted as a small key-value contract
//! ([`KeyValueStore`]) — one durable implementation backed by a JSON file,
//! one in-memory implementation for the ephemeral session scope and tests.
//! [`PrivateKeyStore`] layers the key-namespacing and error policy on top.

use crate::error::{ClientError, ClientResult};
use cipherchat_crypto::SerializedKey;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

/// Key-value persistence contract (the localStorage/sessionStorage shape).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Volatile store. Lives as long as the process — the session-storage
/// analogue, and the default for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.read().expect("store lock poisoned").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.write().expect("store lock poisoned").remove(key);
        Ok(())
    }
}

/// Durable store: a JSON map in a single file, rewritten on every change.
/// Matches the localStorage profile — small values, one writer.
pub struct FileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    fn read_map(&self) -> ClientResult<HashMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|e| {
                    ClientError::Storage(format!("corrupt key store file: {e}"))
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(map)?;
        std::fs::write(&self.path, bytes).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.lock.read().expect("store lock poisoned");
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.lock.write().expect("store lock poisoned");
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let _guard = self.lock.write().expect("store lock poisoned");
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Private-key storage keyed by user id.
///
/// Stores the serialized (base64 PKCS#8) private half under
/// `private_key_{user_id}`. The key never appears in logs.
pub struct PrivateKeyStore<S: KeyValueStore> {
    store: S,
}

fn storage_key(user_id: Uuid) -> String {
    format!("private_key_{user_id}")
}

impl<S: KeyValueStore> PrivateKeyStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists the private key, overwriting any prior value for this user.
    pub fn save(&self, user_id: Uuid, key: &SerializedKey) -> ClientResult<()> {
        self.store.set(&storage_key(user_id), key.as_str())
    }

    /// Loads the private key. `None` when this client never stored one —
    /// not an error, the caller decides what absence means.
    pub fn load(&self, user_id: Uuid) -> ClientResult<Option<SerializedKey>> {
        Ok(self
            .store
            .get(&storage_key(user_id))?
            .map(SerializedKey::new))
    }

    /// Best-effort idempotent removal. Failures are logged, never propagated;
    /// removal is cleanup, not a correctness step.
    pub fn remove(&self, user_id: Uuid) {
        if let Err(e) = self.store.remove(&storage_key(user_id)) {
            warn!("failed to remove private key for user {user_id}: {e}");
        }
    }
}
