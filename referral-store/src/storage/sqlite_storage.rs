use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::Path;

use super::{BlobStorage, StorageError};

/// Single-table SQLite key/value store
pub struct SqliteBlobStorage {
    conn: Connection,
}

impl SqliteBlobStorage {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS blobs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }
}

impl BlobStorage for SqliteBlobStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, blob: &str) -> Result<(), StorageError> {
        let now = chrono::Utc::now().timestamp();
        self.conn.execute(
            r#"
            INSERT INTO blobs (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value=excluded.value,
                updated_at=excluded.updated_at
            "#,
            params![key, blob, now],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let storage = SqliteBlobStorage::open_in_memory().unwrap();
        assert_eq!(storage.read("absent").unwrap(), None);
    }

    #[test]
    fn test_write_overwrites_previous_value() {
        let mut storage = SqliteBlobStorage::open_in_memory().unwrap();
        storage.write("k", "first").unwrap();
        storage.write("k", "second").unwrap();

        assert_eq!(storage.read("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("contacts.sqlite");

        {
            let mut storage = SqliteBlobStorage::open(&path).unwrap();
            storage.write("k", "[]").unwrap();
        }

        let storage = SqliteBlobStorage::open(&path).unwrap();
        assert_eq!(storage.read("k").unwrap().as_deref(), Some("[]"));
    }
}
