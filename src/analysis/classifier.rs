//! Relationship strength classification.

use crate::clock::{TimeWindow, DORMANT_DAYS, MODERATE_DAYS, STRONG_DAYS};
use crate::models::{Contact, RecencySignal, RelationshipStrength};
use chrono::{DateTime, Utc};

/// Classify one contact relative to `now`.
///
/// Each threshold is exclusive on the recent side: a contact last touched
/// exactly 30 days ago is already `Moderate`. Contacts with no recorded
/// interaction are never better than `Weak`.
pub fn classify(contact: &Contact, now: DateTime<Utc>) -> RelationshipStrength {
    classify_signal(contact.recency_signal(), &TimeWindow::new(now))
}

pub(crate) fn classify_signal(signal: RecencySignal, window: &TimeWindow) -> RelationshipStrength {
    match signal {
        RecencySignal::LastContact(at) => {
            if at > window.days_ago(STRONG_DAYS) {
                RelationshipStrength::Strong
            } else if at > window.days_ago(MODERATE_DAYS) {
                RelationshipStrength::Moderate
            } else if at > window.days_ago(DORMANT_DAYS) {
                RelationshipStrength::Weak
            } else {
                RelationshipStrength::Dormant
            }
        }
        RecencySignal::Added(at) => {
            if at < window.days_ago(DORMANT_DAYS) {
                RelationshipStrength::Dormant
            } else {
                RelationshipStrength::Weak
            }
        }
    }
}
