use shared_types::{ContactId, ValidationError};

/// Errors raised by [`crate::ContactStore`] mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Position {position} is out of bounds for {len} contacts")]
    IndexOutOfBounds { position: usize, len: usize },

    #[error("Contact not found: {0}")]
    NotFound(ContactId),
}
