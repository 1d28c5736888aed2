//! Data models for the networking analytics engine.
//!
//! This module contains the contact snapshot record consumed by the engine
//! and the aggregate value objects it produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A contact record as exported by the CRM.
///
/// The engine only reads these; it never mutates a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Identifier assigned by the CRM.
    #[serde(default)]
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Employer, used for grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Email address (not validated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number (not parsed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// When the record was created.
    pub date_added: DateTime<Utc>,
    /// Most recent interaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<DateTime<Utc>>,
    /// Scheduled follow-up reminder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<DateTime<Utc>>,
}

impl Contact {
    /// Creates a bare contact added at `date_added`.
    #[cfg(test)]
    pub fn new(id: impl Into<String>, date_added: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            company: None,
            email: None,
            phone: None,
            date_added,
            last_contact: None,
            next_follow_up: None,
        }
    }

    /// Human readable name, falling back to the id.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.id.clone()
        } else {
            name.to_string()
        }
    }

    pub fn has_email(&self) -> bool {
        is_present(&self.email)
    }

    pub fn has_phone(&self) -> bool {
        is_present(&self.phone)
    }

    /// Non-empty company name, if any.
    pub fn company_name(&self) -> Option<&str> {
        self.company.as_deref().filter(|c| !c.is_empty())
    }

    /// The timestamp relationship strength is derived from.
    pub fn recency_signal(&self) -> RecencySignal {
        match self.last_contact {
            Some(at) => RecencySignal::LastContact(at),
            None => RecencySignal::Added(self.date_added),
        }
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Which timestamp a contact's relationship strength is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencySignal {
    /// A real interaction was recorded.
    LastContact(DateTime<Utc>),
    /// No interaction yet; only the creation time is known.
    Added(DateTime<Utc>),
}

/// Relationship health bucket, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStrength {
    /// Contacted within 30 days
    Strong,
    /// Contacted 30-90 days ago
    Moderate,
    /// Contacted 90-180 days ago, or never contacted but recently added
    Weak,
    /// No contact in 180+ days
    Dormant,
}

impl RelationshipStrength {
    pub const ALL: [RelationshipStrength; 4] = [
        RelationshipStrength::Strong,
        RelationshipStrength::Moderate,
        RelationshipStrength::Weak,
        RelationshipStrength::Dormant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RelationshipStrength::Strong => "Strong",
            RelationshipStrength::Moderate => "Moderate",
            RelationshipStrength::Weak => "Weak",
            RelationshipStrength::Dormant => "Dormant",
        }
    }

    /// Returns an emoji representation of the strength.
    pub fn emoji(&self) -> &'static str {
        match self {
            RelationshipStrength::Strong => "🟢",
            RelationshipStrength::Moderate => "🔵",
            RelationshipStrength::Weak => "🟠",
            RelationshipStrength::Dormant => "🔴",
        }
    }
}

impl fmt::Display for RelationshipStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A company and how many contacts work there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCount {
    pub company: String,
    pub contacts: usize,
}

/// Count-based networking statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkingStats {
    pub total_contacts: usize,
    pub added_this_week: usize,
    pub added_this_month: usize,
    /// Contacts added over the last three months divided by 12 weeks.
    pub average_contacts_per_week: f64,
    pub contacts_with_email: usize,
    pub contacts_with_phone: usize,
    pub contacts_with_both: usize,
    /// Up to five companies, most contacts first.
    pub top_companies: Vec<CompanyCount>,
}

/// Distribution of relationship strength across all contacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipHealthData {
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
    pub dormant: usize,
    /// Averaged only over contacts that have a last contact date.
    pub average_days_since_last_contact: f64,
    /// Always holds all four buckets.
    pub distribution: BTreeMap<RelationshipStrength, usize>,
}

impl Default for RelationshipHealthData {
    fn default() -> Self {
        Self {
            strong: 0,
            moderate: 0,
            weak: 0,
            dormant: 0,
            average_days_since_last_contact: 0.0,
            distribution: RelationshipStrength::ALL.iter().map(|s| (*s, 0)).collect(),
        }
    }
}

impl RelationshipHealthData {
    pub fn count(&self, strength: RelationshipStrength) -> usize {
        match strength {
            RelationshipStrength::Strong => self.strong,
            RelationshipStrength::Moderate => self.moderate,
            RelationshipStrength::Weak => self.weak,
            RelationshipStrength::Dormant => self.dormant,
        }
    }
}

/// Follow-ups due within one week-long window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// Start date label, e.g. "Mar 8".
    pub label: String,
    pub week_start: DateTime<Utc>,
    pub count: usize,
}

/// Reminder-related counts, timing and trend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowUpMetrics {
    pub total_reminders_set: usize,
    pub overdue: usize,
    /// Due within the next 7 days.
    pub upcoming: usize,
    /// A later interaction happened after the reminder was due.
    pub completed: usize,
    /// Mean days from adding a contact to its scheduled follow-up.
    pub average_follow_up_time: f64,
    pub completion_rate: f64,
    /// Eight weekly buckets, oldest first.
    pub follow_ups_by_week: Vec<WeeklyBucket>,
}

/// Letter grade for a networking score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            90..=100 => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::BPlus,
            60..=69 => Grade::B,
            50..=59 => Grade::CPlus,
            40..=49 => Grade::C,
            30..=39 => Grade::DPlus,
            20..=29 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{}", s)
    }
}

/// The four capped sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub quantity: u32,
    pub activity: u32,
    pub health: u32,
    pub follow_up: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        (self.quantity + self.activity + self.health + self.follow_up).min(100)
    }
}

/// Composite score, grade and insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u32,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
    /// Every triggered insight, in rule order.
    pub insights: Vec<String>,
}

/// Output of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAnalysis {
    /// The reference instant the pass was computed against.
    pub as_of: DateTime<Utc>,
    pub stats: NetworkingStats,
    pub health: RelationshipHealthData,
    pub follow_up: FollowUpMetrics,
    pub score: ScoreCard,
}

/// A contact listed in a report action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub due: DateTime<Utc>,
    pub strength: RelationshipStrength,
}

impl FollowUpItem {
    pub fn from_contact(contact: &Contact, due: DateTime<Utc>, strength: RelationshipStrength) -> Self {
        Self {
            name: contact.display_name(),
            company: contact.company_name().map(String::from),
            due,
            strength,
        }
    }
}

/// Metadata about the analytics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the contact snapshot came from.
    pub source: String,
    /// Reference instant of the analysis.
    pub as_of: DateTime<Utc>,
    /// Number of contacts in the snapshot.
    pub contacts_analyzed: usize,
}

/// The complete analytics report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub metadata: ReportMetadata,
    pub stats: NetworkingStats,
    pub health: RelationshipHealthData,
    pub follow_up: FollowUpMetrics,
    pub score: u32,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
    /// Insights truncated to the configured maximum.
    pub insights: Vec<String>,
    /// Overdue follow-ups, most overdue first.
    pub overdue_follow_ups: Vec<FollowUpItem>,
    /// Follow-ups due in the next 7 days, soonest first.
    pub upcoming_follow_ups: Vec<FollowUpItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn added() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_strength_ordering() {
        assert!(RelationshipStrength::Strong < RelationshipStrength::Moderate);
        assert!(RelationshipStrength::Weak < RelationshipStrength::Dormant);
    }

    #[test]
    fn test_strength_emoji() {
        assert_eq!(RelationshipStrength::Strong.emoji(), "🟢");
        assert_eq!(RelationshipStrength::Moderate.emoji(), "🔵");
        assert_eq!(RelationshipStrength::Weak.emoji(), "🟠");
        assert_eq!(RelationshipStrength::Dormant.emoji(), "🔴");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut contact = Contact::new("c-1", added());
        assert_eq!(contact.display_name(), "c-1");

        contact.first_name = "Ada".to_string();
        assert_eq!(contact.display_name(), "Ada");

        contact.last_name = "Lovelace".to_string();
        assert_eq!(contact.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_empty_strings_are_missing() {
        let mut contact = Contact::new("c-1", added());
        contact.email = Some(String::new());
        contact.company = Some(String::new());
        assert!(!contact.has_email());
        assert!(!contact.has_phone());
        assert_eq!(contact.company_name(), None);
    }

    #[test]
    fn test_recency_signal_prefers_last_contact() {
        let mut contact = Contact::new("c-1", added());
        assert_eq!(contact.recency_signal(), RecencySignal::Added(added()));

        let touched = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
        contact.last_contact = Some(touched);
        assert_eq!(contact.recency_signal(), RecencySignal::LastContact(touched));
    }

    #[test]
    fn test_contact_deserializes_camel_case() {
        let json = r#"{
            "id": "42",
            "firstName": "Grace",
            "lastName": "Hopper",
            "company": "Navy",
            "dateAdded": "2026-01-10T09:00:00Z",
            "nextFollowUp": "2026-02-01T09:00:00Z",
            "interactionCount": 3,
            "quickTags": ["conference"]
        }"#;

        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.display_name(), "Grace Hopper");
        assert_eq!(contact.date_added, added());
        assert!(contact.last_contact.is_none());
        assert!(contact.next_follow_up.is_some());
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_score(100), Grade::APlus);
        assert_eq!(Grade::from_score(90), Grade::APlus);
        assert_eq!(Grade::from_score(89), Grade::A);
        assert_eq!(Grade::from_score(70), Grade::BPlus);
        assert_eq!(Grade::from_score(69), Grade::B);
        assert_eq!(Grade::from_score(50), Grade::CPlus);
        assert_eq!(Grade::from_score(40), Grade::C);
        assert_eq!(Grade::from_score(39), Grade::DPlus);
        assert_eq!(Grade::from_score(20), Grade::D);
        assert_eq!(Grade::from_score(19), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::DPlus.to_string(), "D+");
        assert_eq!(Grade::F.to_string(), "F");
        assert_eq!(serde_json::to_string(&Grade::BPlus).unwrap(), "\"B+\"");
    }

    #[test]
    fn test_default_health_has_all_buckets() {
        let health = RelationshipHealthData::default();
        assert_eq!(health.distribution.len(), 4);
        assert!(health.distribution.values().all(|count| *count == 0));
    }

    #[test]
    fn test_breakdown_total_is_capped() {
        let breakdown = ScoreBreakdown {
            quantity: 25,
            activity: 25,
            health: 25,
            follow_up: 25,
        };
        assert_eq!(breakdown.total(), 100);
    }
}
