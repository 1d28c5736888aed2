//! Reference-instant provider and calendar window helpers.
//!
//! Every analysis pass reads "now" exactly once from a [`Clock`] and derives
//! all of its boundaries from a [`TimeWindow`] anchored at that instant.

use chrono::{DateTime, Duration, Months, Utc};

/// Contacts touched within this many days are strong relationships.
pub const STRONG_DAYS: i64 = 30;

/// Contacts touched within this many days are moderate relationships.
pub const MODERATE_DAYS: i64 = 90;

/// Roughly six months; anything older is dormant.
pub const DORMANT_DAYS: i64 = 180;

/// Window for "upcoming" follow-ups.
pub const UPCOMING_DAYS: i64 = 7;

/// Supplies the reference instant for an analysis pass.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc> + Send + Sync,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant (reproducible runs and tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar-relative boundaries around a reference instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub now: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn days_ago(&self, days: i64) -> DateTime<Utc> {
        self.now - Duration::days(days)
    }

    pub fn days_ahead(&self, days: i64) -> DateTime<Utc> {
        self.now + Duration::days(days)
    }

    pub fn weeks_ago(&self, weeks: i64) -> DateTime<Utc> {
        self.now - Duration::weeks(weeks)
    }

    /// Same wall-clock time `months` calendar months earlier, clamped to the
    /// end of shorter months. Falls back to `now` if out of range.
    pub fn months_ago(&self, months: u32) -> DateTime<Utc> {
        self.now
            .checked_sub_months(Months::new(months))
            .unwrap_or(self.now)
    }
}

/// Whole days elapsed from `from` to `to` (negative if `to` is earlier).
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fixed_clock_returns_pinned_instant() {
        let clock = FixedClock(now());
        assert_eq!(clock.now(), now());
    }

    #[test]
    fn test_closure_clock() {
        let clock = || Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(Clock::now(&clock).format("%Y").to_string(), "2025");
    }

    #[test]
    fn test_window_offsets() {
        let window = TimeWindow::new(now());
        assert_eq!(window.days_ago(7), Utc.with_ymd_and_hms(2026, 3, 24, 12, 0, 0).unwrap());
        assert_eq!(window.days_ahead(7), Utc.with_ymd_and_hms(2026, 4, 7, 12, 0, 0).unwrap());
        assert_eq!(window.weeks_ago(2), window.days_ago(14));
    }

    #[test]
    fn test_months_ago_clamps_to_month_end() {
        let window = TimeWindow::new(now());
        // March 31 minus one month lands on the last day of February.
        assert_eq!(
            window.months_ago(1),
            Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap()
        );
        assert_eq!(
            window.months_ago(3),
            Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_whole_days_truncates() {
        let from = now() - Duration::hours(47);
        assert_eq!(whole_days_between(from, now()), 1);
        assert_eq!(whole_days_between(now(), from), -1);
    }
}
