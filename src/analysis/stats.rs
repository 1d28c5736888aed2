//! Count-based networking statistics.

use crate::clock::TimeWindow;
use crate::models::{CompanyCount, Contact, NetworkingStats};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Number of companies reported in `top_companies`.
pub const TOP_COMPANY_LIMIT: usize = 5;

/// The three-month growth window is always averaged over 12 weeks.
const WEEKS_IN_THREE_MONTHS: f64 = 12.0;

/// Compute growth, completeness and company statistics.
pub fn compute_stats(contacts: &[Contact], now: DateTime<Utc>) -> NetworkingStats {
    let window = TimeWindow::new(now);
    let one_week_ago = window.days_ago(7);
    let one_month_ago = window.months_ago(1);
    let three_months_ago = window.months_ago(3);

    let added_since = |cutoff: DateTime<Utc>| {
        contacts
            .iter()
            .filter(|c| c.date_added >= cutoff)
            .count()
    };

    let added_last_quarter = added_since(three_months_ago);

    NetworkingStats {
        total_contacts: contacts.len(),
        added_this_week: added_since(one_week_ago),
        added_this_month: added_since(one_month_ago),
        average_contacts_per_week: added_last_quarter as f64 / WEEKS_IN_THREE_MONTHS,
        contacts_with_email: contacts.iter().filter(|c| c.has_email()).count(),
        contacts_with_phone: contacts.iter().filter(|c| c.has_phone()).count(),
        contacts_with_both: contacts
            .iter()
            .filter(|c| c.has_email() && c.has_phone())
            .count(),
        top_companies: top_companies(contacts, TOP_COMPANY_LIMIT),
    }
}

/// Group contacts by company, most contacts first.
///
/// Ties keep the order in which each company first appears in `contacts`.
pub fn top_companies(contacts: &[Contact], n: usize) -> Vec<CompanyCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CompanyCount> = Vec::new();

    for company in contacts.iter().filter_map(|c| c.company_name()) {
        match index.get(company) {
            Some(&i) => counts[i].contacts += 1,
            None => {
                index.insert(company, counts.len());
                counts.push(CompanyCount {
                    company: company.to_string(),
                    contacts: 1,
                });
            }
        }
    }

    // sort_by_key is stable, which preserves first-seen order on ties
    counts.sort_by_key(|c| std::cmp::Reverse(c.contacts));
    counts.truncate(n);
    counts
}
