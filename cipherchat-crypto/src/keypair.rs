//! RSA keypair generation, import, and export.
//!
//! Parameters match the original deployment: 2048-bit modulus, public
//! exponent 65537, OAEP with SHA-256. Keys travel as base64-encoded DER —
//! SPKI for the public half, PKCS#8 for the private half.

use crate::codec::{decode_key, encode_key, SerializedKey};
use crate::engine::MODULUS_BITS;
use crate::error::{CryptoError, CryptoResult};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Encrypt-capable handle to a user's public key.
///
/// Only constructed by [`generate_keypair`] and [`import_public`]; the inner
/// key is not reachable outside this crate.
#[derive(Clone, Debug, PartialEq)]
pub struct EncryptionKey(pub(crate) RsaPublicKey);

/// Decrypt-capable handle to the owner's private key.
#[derive(Clone)]
pub struct DecryptionKey(pub(crate) RsaPrivateKey);

// Key material must never reach logs, so no derived Debug.
impl std::fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DecryptionKey(..)")
    }
}

/// RSA keypair for one user identity, created once at registration.
pub struct ChatKeyPair {
    pub public: EncryptionKey,
    pub secret: DecryptionKey,
}

/// Generates a fresh 2048-bit RSA keypair.
///
/// Keygen is by far the slowest operation in this crate (hundreds of
/// milliseconds); it runs exactly once per registration.
pub fn generate_keypair() -> CryptoResult<ChatKeyPair> {
    let secret = RsaPrivateKey::new(&mut rand::rngs::OsRng, MODULUS_BITS)
        .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
    let public = secret.to_public_key();

    Ok(ChatKeyPair {
        public: EncryptionKey(public),
        secret: DecryptionKey(secret),
    })
}

/// Exports a public key as base64-encoded SPKI DER.
pub fn export_public(key: &EncryptionKey) -> CryptoResult<SerializedKey> {
    let der = key
        .0
        .to_public_key_der()
        .map_err(|e| CryptoError::KeyExport(e.to_string()))?;
    Ok(encode_key(der.as_bytes()))
}

/// Exports a private key as base64-encoded PKCS#8 DER.
pub fn export_private(key: &DecryptionKey) -> CryptoResult<SerializedKey> {
    let der = key
        .0
        .to_pkcs8_der()
        .map_err(|e| CryptoError::KeyExport(e.to_string()))?;
    Ok(encode_key(der.as_bytes()))
}

/// Imports a public key from base64-encoded SPKI DER.
///
/// Fails on malformed encoding, a non-RSA algorithm identifier, or a
/// modulus size other than the fixed 2048 bits.
pub fn import_public(serialized: &SerializedKey) -> CryptoResult<EncryptionKey> {
    let der = decode_key(serialized).map_err(|e| CryptoError::KeyImport(e.to_string()))?;
    let key = RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| CryptoError::KeyImport(e.to_string()))?;
    check_modulus(key.size())?;
    Ok(EncryptionKey(key))
}

/// Imports a private key from base64-encoded PKCS#8 DER.
pub fn import_private(serialized: &SerializedKey) -> CryptoResult<DecryptionKey> {
    let der = decode_key(serialized).map_err(|e| CryptoError::KeyImport(e.to_string()))?;
    let key = RsaPrivateKey::from_pkcs8_der(&der)
        .map_err(|e| CryptoError::KeyImport(e.to_string()))?;
    check_modulus(key.size())?;
    Ok(DecryptionKey(key))
}

fn check_modulus(size_bytes: usize) -> CryptoResult<()> {
    if size_bytes != MODULUS_BITS / 8 {
        return Err(CryptoError::KeyImport(format!(
            "unexpected modulus size: {} bits (expected {MODULUS_BITS})",
            size_bytes * 8
        )));
    }
    Ok(())
}
