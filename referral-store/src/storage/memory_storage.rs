use std::collections::HashMap;

use super::{BlobStorage, StorageError};

/// Process-local storage, for tests and for hosts that persist elsewhere
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStorage {
    blobs: HashMap<String, String>,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, blob: &str) -> Self {
        let mut storage = Self::new();
        storage.blobs.insert(key.to_string(), blob.to_string());
        storage
    }
}

impl BlobStorage for MemoryBlobStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}
