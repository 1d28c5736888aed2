//! netcrm - networking analytics for a personal contact CRM
//!
//! Reads a contact snapshot, classifies relationship health, measures
//! follow-up cadence and grades the network with a 0-100 score.
//!
//! Exit codes:
//!   0 - Success (score at or above --min-score, or no --min-score set)
//!   1 - Runtime error (missing snapshot, invalid config, write failure, etc.)
//!   2 - Networking score below the --min-score threshold

mod analysis;
mod cli;
mod clock;
mod config;
mod models;
mod report;
mod snapshot;

use analysis::AnalyticsEngine;
use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use clock::{Clock, FixedClock, SystemClock};
use config::{Config, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use snapshot::{ContactSource, JsonFileSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("netcrm v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .netcrm.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the report sections and insight count.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete analysis workflow. Returns exit code (0 or 2).
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let snapshot_path = args
        .contacts
        .clone()
        .context("A contact snapshot is required (--contacts FILE)")?;
    let source = JsonFileSource::new(snapshot_path);

    let spinner = start_spinner(&args, "Loading contact snapshot...");
    let contacts = source.load()?;
    spinner.finish_and_clear();

    if args.dry_run {
        return handle_dry_run(&source, &contacts);
    }

    let now = args.now.unwrap_or_else(|| SystemClock.now());
    info!("Analyzing {} contacts as of {}", contacts.len(), now);

    // The pass is CPU-only; keep it off the async worker threads and hand
    // back one finished snapshot.
    let spinner = start_spinner(&args, "Analyzing relationships...");
    let contacts = Arc::new(contacts);
    let snapshot = Arc::clone(&contacts);
    let analysis = tokio::task::spawn_blocking(move || {
        AnalyticsEngine::new(FixedClock(now)).analyze(&snapshot)
    })
    .await
    .context("Analysis task panicked")?;
    spinner.finish_and_clear();

    let report = report::build_report(&analysis, &contacts, &source.describe(), &config.report);

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report, &config.report),
    };

    let output_path = PathBuf::from(&config.general.output);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        println!("\n📊 Networking Summary:");
        println!("   Contacts: {}", report.stats.total_contacts);
        println!("   Score: {} / 100 (grade {})", report.score, report.grade);
        println!(
            "   - 🟢 Strong: {} | 🔵 Moderate: {} | 🟠 Weak: {} | 🔴 Dormant: {}",
            report.health.strong, report.health.moderate, report.health.weak, report.health.dormant
        );
        println!(
            "   Follow-ups: {} overdue, {} due this week",
            report.follow_up.overdue, report.follow_up.upcoming
        );
        for insight in &report.insights {
            println!("   💡 {}", insight);
        }
        println!("\n✅ Report saved to: {}", output_path.display());
    }

    if let Some(min_score) = args.min_score {
        if report.score < min_score {
            eprintln!(
                "\n⛔ Networking score {} is below the minimum of {} (exit code 2).",
                report.score, min_score
            );
            return Ok(2);
        }
    }

    Ok(0)
}

/// Handle --dry-run: load the snapshot, print what would be analyzed, exit.
fn handle_dry_run(source: &JsonFileSource, contacts: &[models::Contact]) -> Result<i32> {
    println!("\n🔍 Dry run: snapshot loaded (no analysis)...\n");
    println!("   Source: {}", source.describe());
    println!("   Contacts: {}", contacts.len());
    println!(
        "   With last contact: {}",
        contacts.iter().filter(|c| c.last_contact.is_some()).count()
    );
    println!(
        "   With follow-up reminder: {}",
        contacts.iter().filter(|c| c.next_follow_up.is_some()).count()
    );
    println!("\n✅ Dry run complete.");
    Ok(0)
}

/// Spinner shown while loading and analyzing; hidden in quiet mode.
fn start_spinner(args: &Args, message: &'static str) -> ProgressBar {
    if args.quiet {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
