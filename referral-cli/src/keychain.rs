use keyring::Entry;

const KEYCHAIN_SERVICE: &str = "referral-tracker";
const KEYCHAIN_USER: &str = "blob-passphrase";

#[derive(Debug)]
pub enum KeychainError {
    NotFound,
    ServiceUnavailable(String),
    OperationFailed(String),
}

impl std::fmt::Display for KeychainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeychainError::NotFound => write!(f, "Passphrase not found in keychain"),
            KeychainError::ServiceUnavailable(msg) => {
                write!(f, "Keychain service unavailable: {}", msg)
            }
            KeychainError::OperationFailed(msg) => write!(f, "Keychain operation failed: {}", msg),
        }
    }
}

impl std::error::Error for KeychainError {}

/// Stores the blob passphrase in the OS keychain
pub struct KeychainService;

impl KeychainService {
    fn entry() -> Result<Entry, KeychainError> {
        Entry::new(KEYCHAIN_SERVICE, KEYCHAIN_USER).map_err(|e| {
            KeychainError::ServiceUnavailable(format!("Failed to create keychain entry: {}", e))
        })
    }

    pub fn set_passphrase(passphrase: &str) -> Result<(), KeychainError> {
        Self::entry()?.set_password(passphrase).map_err(|e| {
            KeychainError::OperationFailed(format!("Failed to store passphrase: {}", e))
        })
    }

    pub fn get_passphrase() -> Result<String, KeychainError> {
        Self::entry()?.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => KeychainError::NotFound,
            other => {
                KeychainError::OperationFailed(format!("Failed to retrieve passphrase: {}", other))
            }
        })
    }

    pub fn delete_passphrase() -> Result<(), KeychainError> {
        Self::entry()?.delete_password().map_err(|e| match e {
            keyring::Error::NoEntry => KeychainError::NotFound,
            other => {
                KeychainError::OperationFailed(format!("Failed to delete passphrase: {}", other))
            }
        })
    }
}
