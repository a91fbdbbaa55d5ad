pub mod memory_storage;
pub mod sqlite_storage;

pub use memory_storage::MemoryBlobStorage;
pub use sqlite_storage::SqliteBlobStorage;

/// Logical key the contact blob is stored under
pub const STORAGE_KEY: &str = "referral-tracker.contacts";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Key/value text store the encoded contact list is written to.
pub trait BlobStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, blob: &str) -> Result<(), StorageError>;
}
