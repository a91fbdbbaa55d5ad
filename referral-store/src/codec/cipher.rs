//! Symmetric wrapping of the serialized contact list.
//!
//! Sealed format: `[ Nonce (12) ][ Ciphertext + Tag (N + 16) ]`, carried as
//! standard base64 text so it fits a text-only storage slot.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use std::fmt;

use super::{DecodeError, EncodeError};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;
const KEY_DERIVATION_LABEL: &[u8] = b"referral-tracker-blob-key-v1";

/// 32-byte key used to seal the persisted blob
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Derives a key from a passphrase. Deterministic: the same passphrase
    /// always opens blobs sealed with it.
    pub fn from_passphrase(passphrase: &str) -> Self {
        let digest = Sha256::new()
            .chain_update(KEY_DERIVATION_LABEL)
            .chain_update(passphrase.as_bytes())
            .finalize();

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&digest);
        Self(key)
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(<redacted>)")
    }
}

pub(crate) fn seal(key: &EncryptionKey, plaintext: &[u8]) -> Result<String, EncodeError> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key.0));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|_| EncodeError::Encrypt)?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(sealed))
}

pub(crate) fn open(key: &EncryptionKey, blob: &str) -> Result<Vec<u8>, DecodeError> {
    let sealed = STANDARD.decode(blob.trim())?;
    if sealed.len() < NONCE_LEN + TAG_LEN {
        return Err(DecodeError::Truncated(sealed.len()));
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let cipher = ChaCha20Poly1305::new(Key::from_slice(&key.0));
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| DecodeError::Decrypt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_open_roundtrip() {
        let key = EncryptionKey::from_passphrase("correct horse");
        let sealed = seal(&key, b"[1,2,3]").unwrap();

        assert_eq!(open(&key, &sealed).unwrap(), b"[1,2,3]");
    }

    #[test]
    fn test_sealed_length_and_fresh_nonce() {
        let key = EncryptionKey::from_passphrase("correct horse");
        let first = seal(&key, b"payload").unwrap();
        let second = seal(&key, b"payload").unwrap();

        assert_ne!(first, second);
        let raw = STANDARD.decode(&first).unwrap();
        assert_eq!(raw.len(), NONCE_LEN + b"payload".len() + TAG_LEN);
    }

    #[test]
    fn test_passphrase_derivation_is_deterministic() {
        assert_eq!(
            EncryptionKey::from_passphrase("a"),
            EncryptionKey::from_passphrase("a")
        );
        assert_ne!(
            EncryptionKey::from_passphrase("a"),
            EncryptionKey::from_passphrase("b")
        );
    }

    #[test]
    fn test_open_rejects_short_payload() {
        let key = EncryptionKey::from_passphrase("k");
        let short = STANDARD.encode([0u8; 10]);
        assert!(matches!(open(&key, &short), Err(DecodeError::Truncated(10))));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = EncryptionKey::from_bytes([7u8; KEY_LEN]);
        assert_eq!(format!("{:?}", key), "EncryptionKey(<redacted>)");
    }
}
