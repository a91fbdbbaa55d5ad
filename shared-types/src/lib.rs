pub mod contact;
pub mod filter;
pub mod pipeline;
pub mod tag;

pub use contact::{
    ContactId, ContactsResponse, ReferralContact, TrackedContact, ValidationError,
    DEFAULT_REFERRAL_MESSAGE,
};
pub use filter::{FilterCriteria, FilterForm};
pub use pipeline::{ParseEnumError, ReferralStatus, Stage};
pub use tag::ContactTag;
