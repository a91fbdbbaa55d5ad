mod cipher;

pub use cipher::EncryptionKey;

use std::collections::HashSet;

use shared_types::{ContactId, TrackedContact, ValidationError};

/// Failure to produce a blob from the contact list
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Encryption failed")]
    Encrypt,
}

/// Failure to read a stored blob back into contacts.
///
/// Callers recover from every variant the same way: treat the blob as absent
/// and start from an empty list.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Blob is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Blob is too short to be sealed data ({0} bytes)")]
    Truncated(usize),

    #[error("Blob could not be decrypted (wrong key or tampered data)")]
    Decrypt,

    #[error("Decrypted blob is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Malformed contact data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Stored contact #{position} is invalid: {source}")]
    InvalidContact {
        position: usize,
        source: ValidationError,
    },

    #[error("Contact id {0} appears more than once")]
    DuplicateId(ContactId),
}

/// Stored lists must hold only valid contacts with distinct ids.
fn check_contacts(contacts: &[TrackedContact]) -> Result<(), DecodeError> {
    let mut seen = HashSet::with_capacity(contacts.len());
    for (position, tracked) in contacts.iter().enumerate() {
        tracked
            .contact
            .validate()
            .map_err(|source| DecodeError::InvalidContact { position, source })?;
        if !seen.insert(tracked.id) {
            return Err(DecodeError::DuplicateId(tracked.id));
        }
    }
    Ok(())
}

/// Turns the full contact list into a single text blob and back.
#[derive(Debug, Clone, Default)]
pub struct ContactCodec {
    key: Option<EncryptionKey>,
}

impl ContactCodec {
    /// Blob is the JSON array of contacts, readable as-is.
    pub fn plain() -> Self {
        Self { key: None }
    }

    /// Blob is the JSON array sealed with `key`.
    pub fn encrypted(key: EncryptionKey) -> Self {
        Self { key: Some(key) }
    }

    pub fn is_encrypted(&self) -> bool {
        self.key.is_some()
    }

    pub fn encode(&self, contacts: &[TrackedContact]) -> Result<String, EncodeError> {
        let json = serde_json::to_string(contacts)?;
        match &self.key {
            Some(key) => cipher::seal(key, json.as_bytes()),
            None => Ok(json),
        }
    }

    pub fn decode(&self, blob: &str) -> Result<Vec<TrackedContact>, DecodeError> {
        let json = match &self.key {
            Some(key) => String::from_utf8(cipher::open(key, blob)?)?,
            None => blob.to_string(),
        };
        let contacts: Vec<TrackedContact> = serde_json::from_str(&json)?;
        check_contacts(&contacts)?;
        Ok(contacts)
    }

    /// Decodes `blob`, falling back to an empty list when it is unreadable.
    pub fn decode_or_empty(&self, blob: &str) -> Vec<TrackedContact> {
        match self.decode(blob) {
            Ok(contacts) => contacts,
            Err(e) => {
                tracing::warn!("Discarding unreadable contact data: {}", e);
                Vec::new()
            }
        }
    }
}
