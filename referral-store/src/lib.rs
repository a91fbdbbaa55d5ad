//! Referral Store Crate
//!
//! Core of the referral tracker: the in-memory contact store, the filter
//! engine, and the codec that turns the whole contact list into a single
//! (optionally encrypted) blob for local storage.
//!
//! # Architecture
//!
//! - **Types**: the contact model and filter criteria live in `shared-types`
//! - **Store**: [`ContactStore`] owns the ordered list and validates mutations
//! - **Filter**: [`filter_contacts`] is a pure view over a slice of contacts
//! - **Codec**: [`ContactCodec`] encodes/decodes the persisted blob
//! - **Storage**: [`BlobStorage`] is the key/value medium the blob is written to
//! - **Tracker**: [`Tracker`] wires the pieces together and decides when to persist
//!
//! # Example
//!
//! ```rust,ignore
//! use referral_store::{ContactCodec, MemoryBlobStorage, PersistPolicy, Tracker};
//! use shared_types::ReferralContact;
//!
//! let mut tracker = Tracker::open(MemoryBlobStorage::new(), ContactCodec::plain(), PersistPolicy::default())?;
//! tracker.add(ReferralContact::new("Asha", "Acme"))?;
//! ```

pub mod codec;
pub mod error;
pub mod filter;
pub mod storage;
pub mod store;
pub mod tracker;

pub use codec::{ContactCodec, DecodeError, EncodeError, EncryptionKey};
pub use error::StoreError;
pub use filter::filter_contacts;
pub use storage::{BlobStorage, MemoryBlobStorage, SqliteBlobStorage, StorageError, STORAGE_KEY};
pub use store::ContactStore;
pub use tracker::{PersistPolicy, Tracker, TrackerError};
