//! Encryption layer for cipherchat.
//!
//! Provides end-to-end encryption of private messages using:
//! - RSA-OAEP (2048-bit modulus, SHA-256) for message encryption
//! - SPKI / PKCS#8 DER with base64 for key transport and storage
//!
//! # Architecture
//!
//! Each user owns one RSA keypair, generated at registration:
//!
//! 1. **Public half**: exported and published to the backend directory.
//!    Anyone can encrypt a message for the user with it.
//!
//! 2. **Private half**: exported and persisted only on the originating
//!    client. It never leaves that client in cleartext form.
//!
//! Key material is exposed only through capability-scoped handles:
//! [`EncryptionKey`] can encrypt, [`DecryptionKey`] can decrypt, and only
//! this crate constructs either. A sender therefore cannot decrypt its own
//! ciphertext — redisplaying self-authored messages is the caller's problem
//! (see the plaintext cache in `cipherchat-client`).

mod codec;
mod engine;
mod error;
mod keypair;

pub use codec::{decode_key, encode_key, SerializedKey};
pub use engine::{decrypt_message, encrypt_message, MAX_PLAINTEXT_BYTES, MODULUS_BITS};
pub use error::{CryptoError, CryptoResult};
pub use keypair::{
    export_private, export_public, generate_keypair, import_private, import_public, ChatKeyPair,
    DecryptionKey, EncryptionKey,
};
