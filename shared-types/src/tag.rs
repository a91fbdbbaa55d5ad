use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::pipeline::{normalize_label, ParseEnumError};

/// Fixed tag vocabulary a contact can be categorized with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ContactTag {
    Recruiter,
    HiringManager,
    Engineer,
    Alumni,
    WarmIntro,
    FollowUp,
}

impl ContactTag {
    pub const ALL: [ContactTag; 6] = [
        ContactTag::Recruiter,
        ContactTag::HiringManager,
        ContactTag::Engineer,
        ContactTag::Alumni,
        ContactTag::WarmIntro,
        ContactTag::FollowUp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContactTag::Recruiter => "Recruiter",
            ContactTag::HiringManager => "Hiring Manager",
            ContactTag::Engineer => "Engineer",
            ContactTag::Alumni => "Alumni",
            ContactTag::WarmIntro => "Warm Intro",
            ContactTag::FollowUp => "Follow Up",
        }
    }
}

impl fmt::Display for ContactTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContactTag {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_label(s);
        ContactTag::ALL
            .into_iter()
            .find(|tag| normalize_label(tag.label()) == normalized)
            .ok_or_else(|| ParseEnumError::new("tag", s))
    }
}
