//! Markdown and JSON report generation.
//!
//! This module turns an analysis pass into an [`AnalyticsReport`] and
//! renders it for people (Markdown) or other tools (JSON).

use crate::analysis::{overdue_contacts, upcoming_contacts};
use crate::config::ReportConfig;
use crate::models::{
    AnalyticsReport, Contact, FollowUpItem, FollowUpMetrics, NetworkAnalysis, NetworkingStats,
    RelationshipHealthData, RelationshipStrength, ReportMetadata, ScoreBreakdown,
};
use anyhow::Result;

/// Assemble the report for one analysis pass.
pub fn build_report(
    analysis: &NetworkAnalysis,
    contacts: &[Contact],
    source: &str,
    config: &ReportConfig,
) -> AnalyticsReport {
    let (overdue_follow_ups, upcoming_follow_ups) = if config.include_action_lists {
        (
            overdue_contacts(contacts, analysis.as_of, config.action_list_limit),
            upcoming_contacts(contacts, analysis.as_of, config.action_list_limit),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let mut insights = analysis.score.insights.clone();
    insights.truncate(config.max_insights);

    AnalyticsReport {
        metadata: ReportMetadata {
            source: source.to_string(),
            as_of: analysis.as_of,
            contacts_analyzed: contacts.len(),
        },
        stats: analysis.stats.clone(),
        health: analysis.health.clone(),
        follow_up: analysis.follow_up.clone(),
        score: analysis.score.score,
        grade: analysis.score.grade,
        breakdown: analysis.score.breakdown,
        insights,
        overdue_follow_ups,
        upcoming_follow_ups,
    }
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &AnalyticsReport, config: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str("# Networking Analytics Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_score_section(report));
    output.push_str(&generate_insights_section(&report.insights));
    output.push_str(&generate_stats_section(&report.stats, config.include_companies));
    output.push_str(&generate_health_section(&report.health));
    output.push_str(&generate_follow_up_section(&report.follow_up, config.include_trend));

    if config.include_action_lists {
        output.push_str(&generate_action_list(
            "Overdue Follow-Ups",
            "No overdue follow-ups. Nice work!",
            &report.overdue_follow_ups,
        ));
        output.push_str(&generate_action_list(
            "Coming Up This Week",
            "Nothing scheduled for the next 7 days.",
            &report.upcoming_follow_ups,
        ));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Snapshot:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **As Of:** {}\n",
        metadata.as_of.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Contacts Analyzed:** {}\n",
        metadata.contacts_analyzed
    ));
    section.push('\n');

    section
}

/// Generate the score card with its breakdown.
fn generate_score_section(report: &AnalyticsReport) -> String {
    let mut section = String::new();

    section.push_str("## Networking Score\n\n");
    section.push_str(&format!(
        "**{} / 100** (grade **{}**)\n\n",
        report.score, report.grade
    ));
    section.push_str(&generate_breakdown_table(&report.breakdown));

    section
}

fn generate_breakdown_table(breakdown: &ScoreBreakdown) -> String {
    let mut table = String::new();

    table.push_str("| Quantity | Activity | Health | Follow-Up |\n");
    table.push_str("|:---:|:---:|:---:|:---:|\n");
    table.push_str(&format!(
        "| {} / 25 | {} / 25 | {} / 25 | {} / 25 |\n\n",
        breakdown.quantity, breakdown.activity, breakdown.health, breakdown.follow_up
    ));

    table
}

/// Generate the insights section.
fn generate_insights_section(insights: &[String]) -> String {
    if insights.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Insights\n\n");
    for (i, insight) in insights.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, insight));
    }
    section.push('\n');

    section
}

/// Generate the networking statistics section.
fn generate_stats_section(stats: &NetworkingStats, include_companies: bool) -> String {
    let mut section = String::new();

    section.push_str("## Networking Stats\n\n");
    section.push_str(&format!("- **Total Contacts:** {}\n", stats.total_contacts));
    section.push_str(&format!("- **Added This Week:** {}\n", stats.added_this_week));
    section.push_str(&format!("- **Added This Month:** {}\n", stats.added_this_month));
    section.push_str(&format!(
        "- **Average Per Week (last 3 months):** {:.1}\n",
        stats.average_contacts_per_week
    ));
    section.push_str(&format!(
        "- **With Email / Phone / Both:** {} / {} / {}\n\n",
        stats.contacts_with_email, stats.contacts_with_phone, stats.contacts_with_both
    ));

    if include_companies && !stats.top_companies.is_empty() {
        section.push_str("### Top Companies\n\n");
        section.push_str("| Company | Contacts |\n");
        section.push_str("|:---|:---:|\n");

        for company in &stats.top_companies {
            section.push_str(&format!("| {} | {} |\n", company.company, company.contacts));
        }
        section.push('\n');
    }

    section
}

/// Generate the relationship health section.
fn generate_health_section(health: &RelationshipHealthData) -> String {
    let mut section = String::new();

    section.push_str("## Relationship Health\n\n");

    let header: Vec<String> = RelationshipStrength::ALL
        .iter()
        .map(|s| format!("{} {}", s.emoji(), s))
        .collect();
    let counts: Vec<String> = RelationshipStrength::ALL
        .iter()
        .map(|s| health.count(*s).to_string())
        .collect();

    section.push_str(&format!("| {} |\n", header.join(" | ")));
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!("| {} |\n\n", counts.join(" | ")));
    section.push_str(&format!(
        "Average days since last contact: **{:.1}**\n\n",
        health.average_days_since_last_contact
    ));

    section
}

/// Generate the follow-up metrics section.
fn generate_follow_up_section(metrics: &FollowUpMetrics, include_trend: bool) -> String {
    let mut section = String::new();

    section.push_str("## Follow-Ups\n\n");
    section.push_str(&format!("- **Reminders Set:** {}\n", metrics.total_reminders_set));
    section.push_str(&format!("- **Overdue:** {}\n", metrics.overdue));
    section.push_str(&format!("- **Due In Next 7 Days:** {}\n", metrics.upcoming));
    section.push_str(&format!("- **Completed:** {}\n", metrics.completed));
    section.push_str(&format!(
        "- **Completion Rate:** {:.0}%\n",
        metrics.completion_rate * 100.0
    ));
    section.push_str(&format!(
        "- **Average Days To Follow-Up:** {:.1}\n\n",
        metrics.average_follow_up_time
    ));

    if include_trend {
        section.push_str("### Last 8 Weeks\n\n");
        section.push_str("| Week Of | Follow-Ups |\n");
        section.push_str("|:---|:---:|\n");

        for bucket in &metrics.follow_ups_by_week {
            section.push_str(&format!("| {} | {} |\n", bucket.label, bucket.count));
        }
        section.push('\n');
    }

    section
}

/// Generate an action list of contacts to follow up with.
fn generate_action_list(title: &str, empty_message: &str, items: &[FollowUpItem]) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));

    if items.is_empty() {
        section.push_str(empty_message);
        section.push_str("\n\n");
        return section;
    }

    for item in items {
        let company = item
            .company
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        section.push_str(&format!(
            "- {} {}{} - due {}\n",
            item.strength.emoji(),
            item.name,
            company,
            item.due.format("%Y-%m-%d")
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by netcrm*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &AnalyticsReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
