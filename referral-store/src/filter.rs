use shared_types::{FilterCriteria, TrackedContact};

/// Returns the contacts matching `criteria`, in their original order.
pub fn filter_contacts<'a>(
    contacts: &'a [TrackedContact],
    criteria: &FilterCriteria,
) -> Vec<&'a TrackedContact> {
    contacts
        .iter()
        .filter(|tracked| criteria.matches(&tracked.contact))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContactStore;
    use shared_types::{ContactTag, ReferralContact, ReferralStatus, Stage};

    fn sample_store() -> ContactStore {
        let mut store = ContactStore::new();

        let mut asha = ReferralContact::new("Asha", "Acme");
        asha.tags.insert(ContactTag::Engineer);
        store.add(asha).unwrap();

        let mut ben = ReferralContact::new("Ben", "Globex");
        ben.stage = Stage::Accepted;
        ben.referral_status = ReferralStatus::WillRefer;
        ben.tags.insert(ContactTag::Recruiter);
        store.add(ben).unwrap();

        let mut carla = ReferralContact::new("Carla", "ACME Labs");
        carla.stage = Stage::Accepted;
        carla.tags.insert(ContactTag::Engineer);
        carla.tags.insert(ContactTag::Alumni);
        store.add(carla).unwrap();

        store
    }

    fn names(contacts: &[&TrackedContact]) -> Vec<String> {
        contacts.iter().map(|c| c.contact.name.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let store = sample_store();
        let filtered = filter_contacts(store.all(), &FilterCriteria::default());

        assert_eq!(filtered.len(), store.len());
        assert!(filtered.iter().zip(store.all()).all(|(a, b)| *a == b));

        assert!(filter_contacts(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_criteria_are_anded_and_order_preserved() {
        let store = sample_store();

        let by_company = FilterCriteria {
            company: Some("acme".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&filter_contacts(store.all(), &by_company)), vec!["Asha", "Carla"]);

        let by_company_and_stage = FilterCriteria {
            company: Some("acme".to_string()),
            stage: Some(Stage::Accepted),
            ..Default::default()
        };
        assert_eq!(
            names(&filter_contacts(store.all(), &by_company_and_stage)),
            vec!["Carla"]
        );
    }

    #[test]
    fn test_tag_and_status_filters() {
        let store = sample_store();

        let engineers = FilterCriteria {
            tag: Some(ContactTag::Engineer),
            ..Default::default()
        };
        assert_eq!(names(&filter_contacts(store.all(), &engineers)), vec!["Asha", "Carla"]);

        let will_refer = FilterCriteria {
            referral_status: Some(ReferralStatus::WillRefer),
            ..Default::default()
        };
        assert_eq!(names(&filter_contacts(store.all(), &will_refer)), vec!["Ben"]);

        let nobody = FilterCriteria {
            tag: Some(ContactTag::FollowUp),
            ..Default::default()
        };
        assert!(filter_contacts(store.all(), &nobody).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let store = sample_store();
        let criteria = FilterCriteria {
            name: Some("a".to_string()),
            ..Default::default()
        };

        let once: Vec<TrackedContact> = filter_contacts(store.all(), &criteria)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_contacts(&once, &criteria);

        assert_eq!(twice.len(), once.len());
        assert!(twice.iter().zip(&once).all(|(a, b)| *a == b));
    }
}
