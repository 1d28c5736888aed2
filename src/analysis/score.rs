//! Networking score, letter grade and insights.
//!
//! The score is the sum of four sub-scores, each worth at most 25 points:
//! how many contacts you have, how many you added this week, how healthy
//! the relationships are, and how reliably follow-ups get done.

use crate::models::{
    FollowUpMetrics, Grade, NetworkingStats, RelationshipHealthData, ScoreBreakdown, ScoreCard,
};

const MAX_SUB_SCORE: u32 = 25;

/// Contacts needed for the full quantity sub-score.
const TARGET_CONTACTS: usize = 50;

/// Weekly additions needed for the full activity sub-score.
const TARGET_WEEKLY_ADDITIONS: usize = 3;

/// Completion rate that earns the full follow-up sub-score.
const TARGET_COMPLETION_RATE: f64 = 0.8;

/// Share of dormant relationships that triggers a warning.
const DORMANT_WARNING_RATIO: f64 = 0.3;

/// Weekly additions that earn praise.
const PRAISE_WEEKLY_ADDITIONS: usize = 5;

/// Combine the three aggregates into a score card.
pub fn synthesize(
    stats: &NetworkingStats,
    health: &RelationshipHealthData,
    follow_up: &FollowUpMetrics,
) -> ScoreCard {
    let breakdown = score_breakdown(stats, health, follow_up);
    let score = breakdown.total();

    ScoreCard {
        score,
        grade: Grade::from_score(score),
        breakdown,
        insights: insights(stats, health, follow_up),
    }
}

pub fn score_breakdown(
    stats: &NetworkingStats,
    health: &RelationshipHealthData,
    follow_up: &FollowUpMetrics,
) -> ScoreBreakdown {
    ScoreBreakdown {
        quantity: linear_ramp(stats.total_contacts, TARGET_CONTACTS),
        activity: linear_ramp(stats.added_this_week, TARGET_WEEKLY_ADDITIONS),
        health: health_score(stats.total_contacts, health),
        follow_up: follow_up_score(follow_up.completion_rate),
    }
}

/// Integer ramp from 0 to 25 at `target`, capped.
fn linear_ramp(value: usize, target: usize) -> u32 {
    let points = value.saturating_mul(MAX_SUB_SCORE as usize) / target;
    points.min(MAX_SUB_SCORE as usize) as u32
}

fn health_score(total_contacts: usize, health: &RelationshipHealthData) -> u32 {
    if total_contacts == 0 {
        return 0;
    }
    let healthy = (health.strong + health.moderate) as f64 / total_contacts as f64;
    to_points(healthy)
}

fn follow_up_score(completion_rate: f64) -> u32 {
    if completion_rate >= TARGET_COMPLETION_RATE {
        MAX_SUB_SCORE
    } else {
        to_points(completion_rate)
    }
}

fn to_points(ratio: f64) -> u32 {
    let points = (ratio * MAX_SUB_SCORE as f64).round();
    points.clamp(0.0, MAX_SUB_SCORE as f64) as u32
}

/// Evaluate the insight rules in order. Callers decide how many to show.
pub fn insights(
    stats: &NetworkingStats,
    health: &RelationshipHealthData,
    follow_up: &FollowUpMetrics,
) -> Vec<String> {
    let mut insights = Vec::new();
    let total = stats.total_contacts;

    if stats.added_this_week == 0 {
        insights.push(
            "You haven't added any contacts this week. Try to meet one new person!".to_string(),
        );
    } else if stats.added_this_week >= PRAISE_WEEKLY_ADDITIONS {
        insights.push(format!(
            "Great networking week! You added {} contacts.",
            stats.added_this_week
        ));
    }

    if total > 0 {
        let dormant_ratio = health.dormant as f64 / total as f64;
        if dormant_ratio > DORMANT_WARNING_RATIO {
            insights.push(format!(
                "{}% of your relationships are dormant. Consider reaching out!",
                (dormant_ratio * 100.0) as u32
            ));
        }
    }

    if follow_up.overdue > 0 {
        insights.push(format!(
            "You have {} overdue follow-ups. Time to reconnect!",
            follow_up.overdue
        ));
    }

    if follow_up.upcoming > 0 {
        insights.push(format!(
            "{} follow-ups coming up this week. Stay on track!",
            follow_up.upcoming
        ));
    }

    let incomplete = total.saturating_sub(stats.contacts_with_both);
    if incomplete > total / 2 {
        insights.push(
            "Many contacts are missing email or phone. Complete profiles for better networking!"
                .to_string(),
        );
    }

    insights
}
