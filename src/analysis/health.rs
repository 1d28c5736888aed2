//! Relationship health distribution.

use super::classifier::classify_signal;
use crate::clock::{whole_days_between, TimeWindow};
use crate::models::{Contact, RelationshipHealthData, RelationshipStrength};
use chrono::{DateTime, Utc};

/// Classify every contact and summarise the strength distribution.
pub fn compute_health(contacts: &[Contact], now: DateTime<Utc>) -> RelationshipHealthData {
    let window = TimeWindow::new(now);
    let mut health = RelationshipHealthData::default();

    let mut total_days_since_contact: i64 = 0;
    let mut contacts_with_last_contact: usize = 0;

    for contact in contacts {
        let strength = classify_signal(contact.recency_signal(), &window);

        *health.distribution.entry(strength).or_insert(0) += 1;

        match strength {
            RelationshipStrength::Strong => health.strong += 1,
            RelationshipStrength::Moderate => health.moderate += 1,
            RelationshipStrength::Weak => health.weak += 1,
            RelationshipStrength::Dormant => health.dormant += 1,
        }

        if let Some(last_contact) = contact.last_contact {
            total_days_since_contact += whole_days_between(last_contact, now);
            contacts_with_last_contact += 1;
        }
    }

    if contacts_with_last_contact > 0 {
        health.average_days_since_last_contact =
            total_days_since_contact as f64 / contacts_with_last_contact as f64;
    }

    health
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 18, 0, 0).unwrap()
    }

    fn contacted(days_ago: i64) -> Contact {
        let mut contact = Contact::new("c", now() - Duration::days(400));
        contact.last_contact = Some(now() - Duration::days(days_ago));
        contact
    }

    #[test]
    fn test_empty_input_has_all_buckets_at_zero() {
        let health = compute_health(&[], now());

        assert_eq!(health.strong + health.moderate + health.weak + health.dormant, 0);
        assert_eq!(health.average_days_since_last_contact, 0.0);
        assert_eq!(health.distribution.len(), 4);
        for strength in RelationshipStrength::ALL {
            assert_eq!(health.distribution.get(&strength), Some(&0));
        }
    }

    #[test]
    fn test_distribution_matches_counts() {
        let contacts = vec![
            contacted(1),
            contacted(10),
            contacted(45),
            contacted(100),
            contacted(500),
            Contact::new("new", now() - Duration::days(2)),
        ];

        let health = compute_health(&contacts, now());

        assert_eq!(health.strong, 2);
        assert_eq!(health.moderate, 1);
        assert_eq!(health.weak, 2);
        assert_eq!(health.dormant, 1);
        for strength in RelationshipStrength::ALL {
            assert_eq!(health.distribution[&strength], health.count(strength));
        }
        assert_eq!(health.distribution.values().sum::<usize>(), contacts.len());
    }

    #[test]
    fn test_average_excludes_contacts_without_last_contact() {
        let contacts = vec![
            contacted(10),
            contacted(30),
            Contact::new("never", now() - Duration::days(1000)),
        ];

        let health = compute_health(&contacts, now());

        assert_eq!(health.average_days_since_last_contact, 20.0);
        assert_eq!(health.dormant, 1);
    }

    #[test]
    fn test_zero_buckets_still_present() {
        let health = compute_health(&[contacted(3)], now());
        assert_eq!(health.distribution[&RelationshipStrength::Strong], 1);
        assert_eq!(health.distribution[&RelationshipStrength::Dormant], 0);
        assert_eq!(health.distribution.len(), 4);
    }
}
