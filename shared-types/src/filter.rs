use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::contact::ReferralContact;
use crate::pipeline::{ParseEnumError, ReferralStatus, Stage};
use crate::tag::ContactTag;

/// Filter inputs as the list view holds them; an empty string means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct FilterForm {
    pub name: String,
    pub company: String,
    pub stage: String,
    pub referral_status: String,
    pub tag: String,
}

/// Predicates applied to the contact list. Every criterion left as `None`
/// matches everything; the set criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub company: Option<String>,
    pub stage: Option<Stage>,
    pub referral_status: Option<ReferralStatus>,
    pub tag: Option<ContactTag>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn text_criterion(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        text_criterion(&self.name).is_none()
            && text_criterion(&self.company).is_none()
            && self.stage.is_none()
            && self.referral_status.is_none()
            && self.tag.is_none()
    }

    pub fn matches(&self, contact: &ReferralContact) -> bool {
        if let Some(name) = text_criterion(&self.name) {
            if !contains_ignore_case(&contact.name, name) {
                return false;
            }
        }
        if let Some(company) = text_criterion(&self.company) {
            if !contains_ignore_case(&contact.company, company) {
                return false;
            }
        }
        if let Some(stage) = self.stage {
            if contact.stage != stage {
                return false;
            }
        }
        if let Some(status) = self.referral_status {
            if contact.referral_status != status {
                return false;
            }
        }
        if let Some(tag) = self.tag {
            if !contact.has_tag(tag) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl TryFrom<FilterForm> for FilterCriteria {
    type Error = ParseEnumError;

    fn try_from(form: FilterForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: non_empty(form.name),
            company: non_empty(form.company),
            stage: non_empty(form.stage)
                .map(|s| s.parse::<Stage>())
                .transpose()?,
            referral_status: non_empty(form.referral_status)
                .map(|s| s.parse::<ReferralStatus>())
                .transpose()?,
            tag: non_empty(form.tag)
                .map(|s| s.parse::<ContactTag>())
                .transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferralContact {
        let mut contact = ReferralContact::new("Asha Rao", "Acme Corp");
        contact.stage = Stage::Accepted;
        contact.tags.insert(ContactTag::Engineer);
        contact
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&sample()));
        assert!(criteria.matches(&ReferralContact::default()));
    }

    #[test]
    fn test_empty_text_criterion_is_unset() {
        let criteria = FilterCriteria {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert!(criteria.matches(&sample()));
    }

    #[test]
    fn test_text_criteria_are_case_insensitive_substrings() {
        let criteria = FilterCriteria {
            name: Some("RAO".to_string()),
            company: Some("acm".to_string()),
            ..Default::default()
        };
        assert!(criteria.matches(&sample()));

        let criteria = FilterCriteria {
            company: Some("globex".to_string()),
            ..Default::default()
        };
        assert!(!criteria.matches(&sample()));
    }

    #[test]
    fn test_enum_and_tag_criteria_are_exact() {
        let matching = FilterCriteria {
            stage: Some(Stage::Accepted),
            tag: Some(ContactTag::Engineer),
            ..Default::default()
        };
        assert!(matching.matches(&sample()));

        let wrong_status = FilterCriteria {
            stage: Some(Stage::Accepted),
            referral_status: Some(ReferralStatus::WillRefer),
            ..Default::default()
        };
        assert!(!wrong_status.matches(&sample()));

        let missing_tag = FilterCriteria {
            tag: Some(ContactTag::Recruiter),
            ..Default::default()
        };
        assert!(!missing_tag.matches(&sample()));
    }

    #[test]
    fn test_form_conversion_maps_empty_strings_to_unset() {
        let form = FilterForm {
            company: "acm".to_string(),
            stage: "Referral Asked".to_string(),
            ..Default::default()
        };
        let criteria = FilterCriteria::try_from(form).unwrap();

        assert_eq!(criteria.name, None);
        assert_eq!(criteria.company.as_deref(), Some("acm"));
        assert_eq!(criteria.stage, Some(Stage::ReferralAsked));
        assert_eq!(criteria.referral_status, None);
        assert_eq!(criteria.tag, None);
    }

    #[test]
    fn test_form_conversion_rejects_unknown_values() {
        let form = FilterForm {
            tag: "VIP".to_string(),
            ..Default::default()
        };
        let err = FilterCriteria::try_from(form).unwrap_err();
        assert_eq!(err.kind, "tag");
    }
}
