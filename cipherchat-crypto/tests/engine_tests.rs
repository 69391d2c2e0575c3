use cipherchat_crypto::{
    decrypt_message, encode_key, encrypt_message, generate_keypair, CryptoError,
    MAX_PLAINTEXT_BYTES,
};
use std::sync::OnceLock;

fn keypair() -> &'static cipherchat_crypto::ChatKeyPair {
    static KP: OnceLock<cipherchat_crypto::ChatKeyPair> = OnceLock::new();
    KP.get_or_init(|| generate_keypair().unwrap())
}

#[test]
fn encrypt_decrypt_roundtrip() {
    let kp = keypair();
    let ciphertext = encrypt_message("olá, mundo", &kp.public).unwrap();
    assert_eq!(decrypt_message(&ciphertext, &kp.secret).unwrap(), "olá, mundo");
}

#[test]
fn roundtrip_multibyte_utf8() {
    let kp = keypair();
    let message = "mensagem secreta 🔐 — ação";
    let ciphertext = encrypt_message(message, &kp.public).unwrap();
    assert_eq!(decrypt_message(&ciphertext, &kp.secret).unwrap(), message);
}

#[test]
fn roundtrip_empty_message() {
    let kp = keypair();
    let ciphertext = encrypt_message("", &kp.public).unwrap();
    assert_eq!(decrypt_message(&ciphertext, &kp.secret).unwrap(), "");
}

#[test]
fn max_length_plaintext_accepted() {
    let kp = keypair();
    let message = "a".repeat(MAX_PLAINTEXT_BYTES);
    let ciphertext = encrypt_message(&message, &kp.public).unwrap();
    assert_eq!(decrypt_message(&ciphertext, &kp.secret).unwrap(), message);
}

#[test]
fn oversized_plaintext_rejected() {
    let kp = keypair();
    let message = "a".repeat(MAX_PLAINTEXT_BYTES + 1);
    let result = encrypt_message(&message, &kp.public);
    assert!(matches!(
        result.unwrap_err(),
        CryptoError::PlaintextTooLarge { len: 191, max: 190 }
    ));
}

#[test]
fn oversized_by_byte_length_not_char_count() {
    let kp = keypair();
    // 96 four-byte emoji = 384 bytes but only 96 chars
    let message = "🔐".repeat(96);
    let result = encrypt_message(&message, &kp.public);
    assert!(matches!(
        result.unwrap_err(),
        CryptoError::PlaintextTooLarge { .. }
    ));
}

#[test]
fn encryption_is_randomized() {
    let kp = keypair();
    let c1 = encrypt_message("mesma mensagem", &kp.public).unwrap();
    let c2 = encrypt_message("mesma mensagem", &kp.public).unwrap();
    assert_ne!(c1, c2);
    assert_eq!(decrypt_message(&c1, &kp.secret).unwrap(), "mesma mensagem");
    assert_eq!(decrypt_message(&c2, &kp.secret).unwrap(), "mesma mensagem");
}

#[test]
fn wrong_key_fails_decrypt() {
    let kp = keypair();
    let other = generate_keypair().unwrap();
    let ciphertext = encrypt_message("para outra pessoa", &kp.public).unwrap();
    assert!(matches!(
        decrypt_message(&ciphertext, &other.secret).unwrap_err(),
        CryptoError::Decryption
    ));
}

#[test]
fn tampered_ciphertext_fails_padding_check() {
    let kp = keypair();
    let ciphertext = encrypt_message("conteúdo íntegro", &kp.public).unwrap();

    // Flip one bit of the raw ciphertext and re-encode
    let mut raw = cipherchat_crypto::decode_key(&cipherchat_crypto::SerializedKey::new(
        ciphertext.clone(),
    ))
    .unwrap();
    raw[17] ^= 0x01;
    let tampered = encode_key(&raw).to_string();

    assert!(matches!(
        decrypt_message(&tampered, &kp.secret).unwrap_err(),
        CryptoError::Decryption
    ));
}

#[test]
fn truncated_ciphertext_fails() {
    let kp = keypair();
    let ciphertext = encrypt_message("curta", &kp.public).unwrap();
    let mut raw =
        cipherchat_crypto::decode_key(&cipherchat_crypto::SerializedKey::new(ciphertext)).unwrap();
    raw.truncate(raw.len() / 2);
    let truncated = encode_key(&raw).to_string();

    assert!(decrypt_message(&truncated, &kp.secret).is_err());
}

#[test]
fn non_base64_ciphertext_fails() {
    let kp = keypair();
    assert!(decrypt_message("not ciphertext at all", &kp.secret).is_err());
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn any_short_message_roundtrips(message in "[a-zA-Z0-9 àéíóúç]{0,190}") {
            prop_assume!(message.len() <= MAX_PLAINTEXT_BYTES);
            let kp = keypair();
            let ciphertext = encrypt_message(&message, &kp.public).unwrap();
            prop_assert_eq!(decrypt_message(&ciphertext, &kp.secret).unwrap(), message);
        }
    }
}
