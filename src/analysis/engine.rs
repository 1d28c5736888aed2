//! One analysis pass over a contact snapshot.

use super::{compute_follow_up, compute_health, compute_stats, synthesize};
use crate::clock::Clock;
use crate::models::{Contact, NetworkAnalysis};
use tracing::debug;

/// Runs the aggregators and the score synthesizer against an injected clock.
pub struct AnalyticsEngine<C: Clock> {
    clock: C,
}

impl<C: Clock> AnalyticsEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Analyze a frozen snapshot. `now` is read exactly once per pass.
    pub fn analyze(&self, contacts: &[Contact]) -> NetworkAnalysis {
        let now = self.clock.now();
        debug!("Analyzing {} contacts as of {}", contacts.len(), now);

        let stats = compute_stats(contacts, now);
        let health = compute_health(contacts, now);
        let follow_up = compute_follow_up(contacts, now);

        debug!(
            "Aggregates: {} added this week, {} strong, {} overdue",
            stats.added_this_week, health.strong, follow_up.overdue
        );

        let score = synthesize(&stats, &health, &follow_up);

        NetworkAnalysis {
            as_of: now,
            stats,
            health,
            follow_up,
            score,
        }
    }
}
