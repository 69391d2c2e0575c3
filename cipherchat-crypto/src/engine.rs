//! Message encryption and decryption.
//!
//! One RSA-OAEP operation per message: the plaintext itself is the RSA
//! input, there is no symmetric session key. That caps message bodies at
//! [`MAX_PLAINTEXT_BYTES`] — a real constraint callers must respect, checked
//! here before any key is touched.

use crate::codec::{decode_key, encode_key, SerializedKey};
use crate::error::{CryptoError, CryptoResult};
use crate::keypair::{DecryptionKey, EncryptionKey};
use rsa::Oaep;
use sha2::Sha256;

/// RSA modulus size. Fixed across the whole deployment; every published
/// public key and stored private key uses it.
pub const MODULUS_BITS: usize = 2048;

/// OAEP overhead with SHA-256 is `2 * 32 + 2` bytes, leaving 190 bytes of
/// plaintext in a 256-byte block.
pub const MAX_PLAINTEXT_BYTES: usize = MODULUS_BITS / 8 - 2 * 32 - 2;

/// Encrypts a UTF-8 message under the recipient's public key.
///
/// Returns base64-encoded ciphertext, the shape the backend stores. OAEP is
/// randomized, so equal plaintexts produce unequal ciphertexts.
pub fn encrypt_message(plaintext: &str, recipient: &EncryptionKey) -> CryptoResult<String> {
    let bytes = plaintext.as_bytes();
    if bytes.len() > MAX_PLAINTEXT_BYTES {
        return Err(CryptoError::PlaintextTooLarge {
            len: bytes.len(),
            max: MAX_PLAINTEXT_BYTES,
        });
    }

    let ciphertext = recipient
        .0
        .encrypt(&mut rand::rngs::OsRng, Oaep::new::<Sha256>(), bytes)
        .map_err(|e| CryptoError::Encryption(format!("RSA-OAEP: {e}")))?;

    Ok(encode_key(&ciphertext).to_string())
}

/// Decrypts a base64 ciphertext with the owner's private key.
///
/// Fails with [`CryptoError::Decryption`] if the ciphertext was produced for
/// a different keypair, was truncated, or fails the OAEP padding check. The
/// error is deliberately detail-free; callers render a placeholder and move
/// on, they never crash the message list over it.
pub fn decrypt_message(ciphertext: &str, owner: &DecryptionKey) -> CryptoResult<String> {
    let bytes = decode_key(&SerializedKey::new(ciphertext))?;

    let plaintext = owner
        .0
        .decrypt(Oaep::new::<Sha256>(), &bytes)
        .map_err(|_| CryptoError::Decryption)?;

    String::from_utf8(plaintext).map_err(|_| CryptoError::Decryption)
}
