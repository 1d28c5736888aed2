//! Follow-up reminder metrics and the weekly trend series.
//!
//! Reminders live on the contact as a single `next_follow_up` instant. There
//! is no explicit "reminder fulfilled" flag, so completion is inferred: a
//! follow-up counts as completed when a real interaction was recorded after
//! the reminder was due.

use super::classify;
use crate::clock::{whole_days_between, TimeWindow, UPCOMING_DAYS};
use crate::models::{Contact, FollowUpItem, FollowUpMetrics, WeeklyBucket};
use chrono::{DateTime, Duration, Utc};

/// Number of weekly buckets in `follow_ups_by_week`.
pub const TREND_WEEKS: i64 = 8;

/// Compute reminder counts, timing averages and the 8-week trend.
pub fn compute_follow_up(contacts: &[Contact], now: DateTime<Utc>) -> FollowUpMetrics {
    let window = TimeWindow::new(now);
    let upcoming_until = window.days_ahead(UPCOMING_DAYS);

    let mut metrics = FollowUpMetrics::default();
    let mut total_follow_up_days: i64 = 0;
    let mut timed_follow_ups: usize = 0;

    for contact in contacts {
        let Some(next_follow_up) = contact.next_follow_up else {
            continue;
        };

        metrics.total_reminders_set += 1;

        total_follow_up_days += whole_days_between(contact.date_added, next_follow_up);
        timed_follow_ups += 1;

        if next_follow_up < now {
            metrics.overdue += 1;
        } else if next_follow_up <= upcoming_until {
            metrics.upcoming += 1;
        }

        if is_completed(contact) {
            metrics.completed += 1;
        }
    }

    if timed_follow_ups > 0 {
        metrics.average_follow_up_time = total_follow_up_days as f64 / timed_follow_ups as f64;
    }

    if metrics.total_reminders_set > 0 {
        metrics.completion_rate =
            metrics.completed as f64 / metrics.total_reminders_set as f64;
    }

    metrics.follow_ups_by_week = follow_ups_by_week(contacts, now);

    metrics
}

/// A later interaction happened after the reminder was due.
pub fn is_completed(contact: &Contact) -> bool {
    matches!(
        (contact.last_contact, contact.next_follow_up),
        (Some(last), Some(next)) if last > next
    )
}

/// Count follow-ups per week over the eight weeks ending at `now`.
///
/// Windows are half-open `[start, start + 7d)`, contiguous and oldest first.
/// Follow-ups outside the whole span land in no bucket.
pub fn follow_ups_by_week(contacts: &[Contact], now: DateTime<Utc>) -> Vec<WeeklyBucket> {
    let window = TimeWindow::new(now);

    (0..TREND_WEEKS)
        .rev()
        .map(|offset| {
            let week_start = window.weeks_ago(offset + 1);
            let week_end = week_start + Duration::weeks(1);

            let count = contacts
                .iter()
                .filter_map(|c| c.next_follow_up)
                .filter(|due| *due >= week_start && *due < week_end)
                .count();

            WeeklyBucket {
                label: week_start.format("%b %-d").to_string(),
                week_start,
                count,
            }
        })
        .collect()
}

/// Contacts whose follow-up is already past due, most overdue first.
pub fn overdue_contacts(contacts: &[Contact], now: DateTime<Utc>, n: usize) -> Vec<FollowUpItem> {
    collect_due(contacts, now, n, |due| due < now)
}

/// Contacts due within the next seven days, soonest first.
pub fn upcoming_contacts(contacts: &[Contact], now: DateTime<Utc>, n: usize) -> Vec<FollowUpItem> {
    let until = TimeWindow::new(now).days_ahead(UPCOMING_DAYS);
    collect_due(contacts, now, n, |due| due >= now && due <= until)
}

fn collect_due<F>(contacts: &[Contact], now: DateTime<Utc>, n: usize, keep: F) -> Vec<FollowUpItem>
where
    F: Fn(DateTime<Utc>) -> bool,
{
    let mut items: Vec<FollowUpItem> = contacts
        .iter()
        .filter_map(|c| c.next_follow_up.map(|due| (c, due)))
        .filter(|(_, due)| keep(*due))
        .map(|(c, due)| FollowUpItem::from_contact(c, due, classify(c, now)))
        .collect();

    items.sort_by_key(|item| item.due);
    items.truncate(n);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RelationshipStrength;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn due_in(days: i64) -> Contact {
        let mut contact = Contact::new(format!("due{}", days), now() - Duration::days(20));
        contact.next_follow_up = Some(now() + Duration::days(days));
        contact
    }

    #[test]
    fn test_empty_input() {
        let metrics = compute_follow_up(&[], now());

        assert_eq!(metrics.total_reminders_set, 0);
        assert_eq!(metrics.overdue, 0);
        assert_eq!(metrics.upcoming, 0);
        assert_eq!(metrics.completed, 0);
        assert_eq!(metrics.average_follow_up_time, 0.0);
        assert_eq!(metrics.completion_rate, 0.0);
        assert_eq!(metrics.follow_ups_by_week.len(), 8);
        assert!(metrics.follow_ups_by_week.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_overdue_and_upcoming_are_exclusive() {
        let mut due_now = Contact::new("now", now() - Duration::days(1));
        due_now.next_follow_up = Some(now());

        let contacts = vec![
            due_in(-3),
            due_in(-1),
            due_now,
            due_in(2),
            due_in(7),
            due_in(8),
            Contact::new("none", now()),
        ];

        let metrics = compute_follow_up(&contacts, now());

        assert_eq!(metrics.total_reminders_set, 6);
        assert_eq!(metrics.overdue, 2);
        assert_eq!(metrics.upcoming, 3);
    }

    #[test]
    fn test_average_follow_up_time() {
        let mut a = Contact::new("a", now() - Duration::days(10));
        a.next_follow_up = Some(now());
        let mut b = Contact::new("b", now() - Duration::days(2));
        b.next_follow_up = Some(now() + Duration::days(2));

        let metrics = compute_follow_up(&[a, b], now());
        assert_eq!(metrics.average_follow_up_time, 7.0);
    }

    #[test]
    fn test_completion_heuristic() {
        let mut completed = due_in(-10);
        completed.last_contact = Some(now() - Duration::days(2));

        let mut contacted_before_due = due_in(-10);
        contacted_before_due.last_contact = Some(now() - Duration::days(12));

        let mut contact_without_reminder = Contact::new("x", now() - Duration::days(40));
        contact_without_reminder.last_contact = Some(now());

        let contacts = vec![completed, contacted_before_due, contact_without_reminder, due_in(3)];
        let metrics = compute_follow_up(&contacts, now());

        assert_eq!(metrics.completed, 1);
        assert_eq!(metrics.total_reminders_set, 3);
        assert!((metrics.completion_rate - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_buckets_oldest_first() {
        let buckets = follow_ups_by_week(&[], now());

        assert_eq!(buckets.len(), 8);
        assert_eq!(buckets[0].week_start, now() - Duration::weeks(8));
        assert_eq!(buckets[7].week_start, now() - Duration::weeks(1));
        assert_eq!(buckets[0].label, "Jan 18");
        assert_eq!(buckets[7].label, "Mar 8");
        for pair in buckets.windows(2) {
            assert_eq!(pair[1].week_start - pair[0].week_start, Duration::weeks(1));
        }
    }

    #[test]
    fn test_weekly_buckets_half_open_and_span_limited() {
        let contacts = vec![
            due_in(-56),     // start of the oldest window
            due_in(-50),     // oldest window
            due_in(-7),      // start of the newest window
            due_in(-1),      // newest window
            due_in(0),       // now is outside the span
            due_in(-57),     // before the span
            due_in(5),       // future
        ];

        let buckets = follow_ups_by_week(&contacts, now());
        let counts: Vec<usize> = buckets.iter().map(|b| b.count).collect();

        assert_eq!(counts, vec![2, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn test_action_lists() {
        let contacts = vec![due_in(-1), due_in(-9), due_in(3), due_in(1), due_in(20)];

        let overdue = overdue_contacts(&contacts, now(), 10);
        assert_eq!(overdue.len(), 2);
        assert_eq!(overdue[0].name, "due-9");
        assert_eq!(overdue[0].strength, RelationshipStrength::Weak);

        let upcoming = upcoming_contacts(&contacts, now(), 1);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].name, "due1");
    }
}
