//! Crypto error types.
//!
//! Error messages carry operation context only — never key bytes or
//! plaintext, since these errors end up in logs.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in key lifecycle and message encryption operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("key import failed: {0}")]
    KeyImport(String),

    #[error("key export failed: {0}")]
    KeyExport(String),

    #[error("invalid encoding: {0}")]
    Encoding(String),

    #[error("plaintext too large for RSA-OAEP: {len} bytes (max {max})")]
    PlaintextTooLarge { len: usize, max: usize },

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed (wrong key or tampered ciphertext)")]
    Decryption,
}
