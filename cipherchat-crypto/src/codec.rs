//! Text-safe encoding of raw key and ciphertext bytes.
//!
//! Standard padded base64, matching what the backend stores in its
//! `public_key` and `ciphertext` text columns. `decode_key(encode_key(b))`
//! returns `b` bit-for-bit for every byte sequence, including empty.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// A key half (or ciphertext) in transport-safe text form.
///
/// Produced by [`encode_key`] and by the export functions in
/// [`crate::keypair`]; also deserialized straight off the wire, in which
/// case [`decode_key`] is the validation point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializedKey(String);

impl SerializedKey {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SerializedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encodes raw bytes as base64 text.
pub fn encode_key(bytes: &[u8]) -> SerializedKey {
    SerializedKey(STANDARD.encode(bytes))
}

/// Decodes base64 text back to raw bytes.
///
/// Fails on characters outside the base64 alphabet or corrupted length.
pub fn decode_key(key: &SerializedKey) -> CryptoResult<Vec<u8>> {
    STANDARD
        .decode(key.as_str())
        .map_err(|e| CryptoError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_binary() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode_key(&encode_key(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn roundtrip_empty() {
        assert_eq!(decode_key(&encode_key(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn invalid_alphabet_rejected() {
        let bad = SerializedKey::new("not base64 at all!!!");
        assert!(matches!(
            decode_key(&bad),
            Err(CryptoError::Encoding(_))
        ));
    }

    #[test]
    fn truncated_input_rejected() {
        let mut encoded = encode_key(b"some key material").as_str().to_string();
        encoded.pop();
        assert!(decode_key(&SerializedKey::new(encoded)).is_err());
    }
}
