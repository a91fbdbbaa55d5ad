use shared_types::{ContactId, FilterCriteria, ReferralContact, TrackedContact};

use crate::codec::{ContactCodec, EncodeError};
use crate::error::StoreError;
use crate::filter::filter_contacts;
use crate::storage::{BlobStorage, StorageError, STORAGE_KEY};
use crate::store::ContactStore;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to encode contacts: {0}")]
    Encode(#[from] EncodeError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// When the contact list gets written back to storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistPolicy {
    /// Write even when the list is empty. Off by default, which means removing
    /// the last contact leaves the previously stored list in place.
    pub persist_empty: bool,
}

/// A hydrated contact store bound to its storage medium.
///
/// Every successful mutation re-encodes the full list and writes it under
/// [`STORAGE_KEY`]. If that write fails the in-memory change stays applied and
/// the error is returned to the caller.
pub struct Tracker<S: BlobStorage> {
    store: ContactStore,
    codec: ContactCodec,
    storage: S,
    policy: PersistPolicy,
}

impl<S: BlobStorage> Tracker<S> {
    /// Loads the stored list. Unreadable data starts an empty store instead of
    /// failing; only a storage read error is returned.
    pub fn open(storage: S, codec: ContactCodec, policy: PersistPolicy) -> Result<Self, TrackerError> {
        let contacts = match storage.read(STORAGE_KEY)? {
            Some(blob) => codec.decode_or_empty(&blob),
            None => Vec::new(),
        };
        tracing::info!(
            "Loaded {} contacts (encrypted: {})",
            contacts.len(),
            codec.is_encrypted()
        );

        Ok(Self {
            store: ContactStore::from_contacts(contacts),
            codec,
            storage,
            policy,
        })
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn contacts(&self) -> &[TrackedContact] {
        self.store.all()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&TrackedContact> {
        filter_contacts(self.store.all(), criteria)
    }

    pub fn add(&mut self, contact: ReferralContact) -> Result<ContactId, TrackerError> {
        let id = self.store.add(contact)?;
        self.persist()?;
        Ok(id)
    }

    pub fn update(&mut self, position: usize, contact: ReferralContact) -> Result<(), TrackerError> {
        self.store.update(position, contact)?;
        self.persist()?;
        Ok(())
    }

    pub fn update_by_id(
        &mut self,
        id: ContactId,
        contact: ReferralContact,
    ) -> Result<(), TrackerError> {
        self.store.update_by_id(id, contact)?;
        self.persist()?;
        Ok(())
    }

    pub fn remove(&mut self, position: usize) -> Result<TrackedContact, TrackerError> {
        let removed = self.store.remove(position)?;
        self.persist()?;
        Ok(removed)
    }

    pub fn remove_by_id(&mut self, id: ContactId) -> Result<TrackedContact, TrackerError> {
        let removed = self.store.remove_by_id(id)?;
        self.persist()?;
        Ok(removed)
    }

    /// Encodes the current list exactly as it would be written to storage.
    pub fn export(&self) -> Result<String, EncodeError> {
        self.codec.encode(self.store.all())
    }

    /// Writes the list according to the policy; returns whether it was written.
    pub fn persist(&mut self) -> Result<bool, TrackerError> {
        if self.store.is_empty() && !self.policy.persist_empty {
            tracing::warn!("Contact list is empty; leaving stored data untouched");
            return Ok(false);
        }

        let blob = self.export()?;
        self.storage.write(STORAGE_KEY, &blob)?;
        tracing::info!("Persisted {} contacts", self.store.len());
        Ok(true)
    }
}
