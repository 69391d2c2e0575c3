//! Per-message disclosure policy.
//!
//! Decides, for each (message, viewer) pair, whether to show cached
//! plaintext, attempt decryption, show the broadcast body, or keep the
//! message opaque. Evaluated fresh on every refresh — nothing here is
//! persisted, the outcome is a pure function of the message, the viewer,
//! the local private key, and the session plaintext cache.

use crate::types::Message;
use cipherchat_crypto::{decrypt_message, CryptoError, DecryptionKey};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// Placeholder shown when the viewer is the recipient but no private key is
/// stored on this client.
pub const MISSING_KEY_PLACEHOLDER: &str = "[Chave privada não encontrada]";

/// Placeholder shown when decryption itself fails.
pub const DECRYPT_FAILED_PLACEHOLDER: &str = "[Erro ao descriptografar]";

/// Marker shown for private messages addressed to somebody else.
pub const OPAQUE_PLACEHOLDER: &str = "🔒 Mensagem criptografada";

/// Session-lifetime cache of plaintext for messages this client authored.
///
/// The sender cannot decrypt its own RSA-OAEP output, so the plaintext is
/// recorded at send time. Never persisted.
pub type PlaintextCache = HashMap<Uuid, String>;

/// How a message relates to the viewer. Classification never touches key
/// material, which is what lets the third-party arm guarantee no decrypt
/// attempt happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Viewer wrote it this session; plaintext is in the cache.
    SelfAuthored,
    /// Viewer is the recipient; decryption may be attempted.
    AddressedToViewer,
    /// Global-channel message, stored in clear.
    Broadcast,
    /// Somebody else's private message.
    ThirdParty,
}

/// Terminal disclosure outcome for one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Disclosure {
    /// Cached plaintext of a self-authored message. Encrypted in transit,
    /// but the viewer already holds the plaintext.
    SelfAuthored { plaintext: String },
    /// Successfully decrypted with the viewer's private key.
    Decrypted { plaintext: String },
    /// Broadcast body, shown verbatim.
    Broadcast { text: String },
    /// Addressed to the viewer but no private key is stored here.
    MissingKey,
    /// Addressed to the viewer but decryption failed.
    DecryptFailed,
    /// Not the viewer's message; shown as an opaque marker.
    Opaque,
}

impl Disclosure {
    /// The text the UI renders for this message.
    pub fn display_text(&self) -> &str {
        match self {
            Disclosure::SelfAuthored { plaintext } => plaintext,
            Disclosure::Decrypted { plaintext } => plaintext,
            Disclosure::Broadcast { text } => text,
            Disclosure::MissingKey => MISSING_KEY_PLACEHOLDER,
            Disclosure::DecryptFailed => DECRYPT_FAILED_PLACEHOLDER,
            Disclosure::Opaque => OPAQUE_PLACEHOLDER,
        }
    }

    /// Whether the UI marks the message with the "encrypted" badge.
    pub fn is_encrypted(&self) -> bool {
        match self {
            Disclosure::SelfAuthored { .. } | Disclosure::Broadcast { .. } => false,
            Disclosure::Decrypted { .. } => true,
            Disclosure::MissingKey | Disclosure::DecryptFailed | Disclosure::Opaque => true,
        }
    }
}

/// Classifies a message relative to the viewer.
///
/// Sender identity wins only when the plaintext cache actually has the
/// message (a self-authored message from a previous session is as opaque
/// to its sender as anyone else's).
pub fn classify(message: &Message, viewer_id: Uuid, cache: &PlaintextCache) -> Route {
    if message.sender_id == viewer_id && cache.contains_key(&message.id) {
        return Route::SelfAuthored;
    }
    match message.recipient_id {
        Some(recipient) if recipient == viewer_id => Route::AddressedToViewer,
        Some(_) => Route::ThirdParty,
        None => Route::Broadcast,
    }
}

/// Evaluates the disclosure outcome for one message.
///
/// Decryption is attempted only on the [`Route::AddressedToViewer`] arm;
/// a failure there degrades to a placeholder and never propagates, so one
/// undecryptable message cannot take down the rest of the list.
pub fn evaluate(
    message: &Message,
    viewer_id: Uuid,
    private_key: Option<&DecryptionKey>,
    cache: &PlaintextCache,
) -> Disclosure {
    match classify(message, viewer_id, cache) {
        Route::SelfAuthored => Disclosure::SelfAuthored {
            // Presence checked by classify
            plaintext: cache.get(&message.id).cloned().unwrap_or_default(),
        },
        Route::Broadcast => Disclosure::Broadcast {
            text: message.ciphertext.clone(),
        },
        Route::ThirdParty => Disclosure::Opaque,
        Route::AddressedToViewer => match private_key {
            None => Disclosure::MissingKey,
            Some(key) => match decrypt_message(&message.ciphertext, key) {
                Ok(plaintext) => Disclosure::Decrypted { plaintext },
                Err(CryptoError::Decryption) => {
                    debug!("decryption failed for message {}", message.id);
                    Disclosure::DecryptFailed
                }
                Err(e) => {
                    debug!("undecodable ciphertext for message {}: {e}", message.id);
                    Disclosure::DecryptFailed
                }
            },
        },
    }
}
