use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;
use uuid::Uuid;

use crate::pipeline::{ReferralStatus, Stage};
use crate::tag::ContactTag;

/// Message used when a contact is saved without one of its own
pub const DEFAULT_REFERRAL_MESSAGE: &str = "Hi, I hope you're doing well! I came across an open \
role at your company that lines up with my background, and I'd be grateful if you would \
consider referring me. I'm happy to share my resume and anything else that helps. Thank you!";

/// Stable identifier assigned to a contact when it is first stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ContactId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Reasons a contact is refused at the add/update boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,

    #[error("Company is required")]
    MissingCompany,
}

/// One outreach target, as edited in the contact form.
///
/// Empty `name`/`company` are allowed on the type itself while a form is
/// being filled in; [`ReferralContact::validate`] is checked by the store
/// before anything is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReferralContact {
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub referral_status: ReferralStatus,
    #[serde(default)]
    pub contact_details: String,
    #[serde(default)]
    pub referral_message: String,
    #[serde(default)]
    pub tags: BTreeSet<ContactTag>,
}

impl ReferralContact {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.company.trim().is_empty() {
            return Err(ValidationError::MissingCompany);
        }
        Ok(())
    }

    /// Fills in the template message when none was written.
    pub fn with_defaults(mut self) -> Self {
        if self.referral_message.trim().is_empty() {
            self.referral_message = DEFAULT_REFERRAL_MESSAGE.to_string();
        }
        self
    }

    pub fn has_tag(&self, tag: ContactTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// A stored contact together with its identity and timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrackedContact {
    pub id: ContactId,
    pub created_at: i64,
    pub updated_at: i64,
    pub contact: ReferralContact,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactsResponse {
    pub contacts: Vec<TrackedContact>,
}
