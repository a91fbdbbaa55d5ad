use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Error returned when text does not name a known stage, status or tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Folds a label ("Won't Refer") or identifier ("wont-refer") into the
/// identifier form used for matching.
pub(crate) fn normalize_label(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| *c != '\'')
        .map(|c| match c {
            ' ' | '_' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Where the connection-request pipeline currently stands for a contact
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    ConnectionSent,
    Accepted,
    ReferralAsked,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::ConnectionSent, Stage::Accepted, Stage::ReferralAsked];

    pub fn label(&self) -> &'static str {
        match self {
            Stage::ConnectionSent => "Connection Sent",
            Stage::Accepted => "Accepted",
            Stage::ReferralAsked => "Referral Asked",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "connection-sent" => Ok(Stage::ConnectionSent),
            "accepted" => Ok(Stage::Accepted),
            "referral-asked" => Ok(Stage::ReferralAsked),
            _ => Err(ParseEnumError::new("stage", s)),
        }
    }
}

/// Whether the contact has committed to providing a referral
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ReferralStatus {
    #[default]
    Pending,
    WillRefer,
    WontRefer,
}

impl ReferralStatus {
    pub const ALL: [ReferralStatus; 3] = [
        ReferralStatus::Pending,
        ReferralStatus::WillRefer,
        ReferralStatus::WontRefer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReferralStatus::Pending => "Pending",
            ReferralStatus::WillRefer => "Will Refer",
            ReferralStatus::WontRefer => "Won't Refer",
        }
    }
}

impl fmt::Display for ReferralStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReferralStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "pending" => Ok(ReferralStatus::Pending),
            "will-refer" => Ok(ReferralStatus::WillRefer),
            "wont-refer" => Ok(ReferralStatus::WontRefer),
            _ => Err(ParseEnumError::new("referral status", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&Stage::ReferralAsked).unwrap();
        assert_eq!(json, "\"referral-asked\"");

        let deserialized: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Stage::ReferralAsked);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&ReferralStatus::WontRefer).unwrap();
        assert_eq!(json, "\"wont-refer\"");
    }

    #[test]
    fn test_defaults_are_first_values() {
        assert_eq!(Stage::default(), Stage::ALL[0]);
        assert_eq!(ReferralStatus::default(), ReferralStatus::ALL[0]);
    }

    #[test]
    fn test_parse_accepts_labels_and_identifiers() {
        for stage in Stage::ALL {
            assert_eq!(stage.label().parse::<Stage>().unwrap(), stage);
        }
        for status in ReferralStatus::ALL {
            assert_eq!(status.label().parse::<ReferralStatus>().unwrap(), status);
        }
        assert_eq!("will-refer".parse::<ReferralStatus>().unwrap(), ReferralStatus::WillRefer);
        assert_eq!("ACCEPTED".parse::<Stage>().unwrap(), Stage::Accepted);
    }

    #[test]
    fn test_parse_rejects_free_text() {
        let err = "Interviewing".parse::<Stage>().unwrap_err();
        assert_eq!(err.kind, "stage");
        assert_eq!(err.value, "Interviewing");
        assert!("".parse::<ReferralStatus>().is_err());
    }
}
