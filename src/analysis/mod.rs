//! Networking analytics.
//!
//! The classifier maps one contact to a relationship strength. The stats,
//! health and follow-up aggregators each read the same snapshot
//! independently, and the score synthesizer combines their outputs.

pub mod classifier;
pub mod engine;
pub mod follow_up;
pub mod health;
pub mod score;
pub mod stats;

pub use classifier::classify;
pub use engine::AnalyticsEngine;
pub use follow_up::{compute_follow_up, overdue_contacts, upcoming_contacts};
pub use health::compute_health;
pub use score::synthesize;
pub use stats::compute_stats;
