use shared_types::{ContactId, ReferralContact, TrackedContact};

use crate::error::StoreError;

/// Ordered, in-memory list of tracked contacts.
///
/// Contacts carry a [`ContactId`] assigned on `add`. Position-based operations
/// act on whatever contact currently sits at that position; only the id-based
/// ones are safe to call with a handle taken before other mutations.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
    contacts: Vec<TrackedContact>,
}

impl ContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted contacts, keeping their order.
    pub fn from_contacts(contacts: Vec<TrackedContact>) -> Self {
        Self { contacts }
    }

    pub fn all(&self) -> &[TrackedContact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: ContactId) -> Option<&TrackedContact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn position_of(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    pub fn id_at(&self, position: usize) -> Result<ContactId, StoreError> {
        self.contacts
            .get(position)
            .map(|c| c.id)
            .ok_or(StoreError::IndexOutOfBounds {
                position,
                len: self.contacts.len(),
            })
    }

    /// Appends a contact after validating it and applying field defaults.
    pub fn add(&mut self, contact: ReferralContact) -> Result<ContactId, StoreError> {
        contact.validate()?;

        let now = chrono::Utc::now().timestamp();
        let id = ContactId::new();
        self.contacts.push(TrackedContact {
            id,
            created_at: now,
            updated_at: now,
            contact: contact.with_defaults(),
        });

        tracing::debug!("Added contact {} ({} total)", id, self.contacts.len());
        Ok(id)
    }

    fn check_position(&self, position: usize) -> Result<(), StoreError> {
        if position < self.contacts.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfBounds {
                position,
                len: self.contacts.len(),
            })
        }
    }

    fn replace_at(&mut self, position: usize, contact: ReferralContact) {
        let tracked = &mut self.contacts[position];
        tracked.contact = contact.with_defaults();
        tracked.updated_at = chrono::Utc::now().timestamp();
        tracing::debug!("Updated contact {} at #{}", tracked.id, position);
    }

    fn remove_at(&mut self, position: usize) -> TrackedContact {
        let removed = self.contacts.remove(position);
        tracing::debug!(
            "Removed contact {} ({} left)",
            removed.id,
            self.contacts.len()
        );
        removed
    }

    /// Replaces the contact at `position` wholesale.
    pub fn update(&mut self, position: usize, contact: ReferralContact) -> Result<(), StoreError> {
        self.check_position(position)?;
        contact.validate()?;
        self.replace_at(position, contact);
        Ok(())
    }

    pub fn update_by_id(
        &mut self,
        id: ContactId,
        contact: ReferralContact,
    ) -> Result<(), StoreError> {
        let position = self.position_of(id).ok_or(StoreError::NotFound(id))?;
        contact.validate()?;
        self.replace_at(position, contact);
        Ok(())
    }

    /// Removes the contact at `position`; later contacts shift down by one.
    pub fn remove(&mut self, position: usize) -> Result<TrackedContact, StoreError> {
        self.check_position(position)?;
        Ok(self.remove_at(position))
    }

    pub fn remove_by_id(&mut self, id: ContactId) -> Result<TrackedContact, StoreError> {
        let position = self.position_of(id).ok_or(StoreError::NotFound(id))?;
        Ok(self.remove_at(position))
    }
}
