//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

/// netcrm - networking analytics for your contact CRM
///
/// Reads a contact export and reports relationship health, follow-up
/// cadence and an overall networking score.
///
/// Examples:
///   netcrm --contacts contacts.json
///   netcrm --contacts contacts.json --format json --output report.json
///   netcrm --contacts contacts.json --now 2026-03-01T09:00:00Z
///   netcrm --contacts contacts.json --min-score 60
///   netcrm --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Contact snapshot to analyze (JSON export)
    ///
    /// Either an array of contacts or an object with a "contacts" array.
    #[arg(
        short = 'i',
        long,
        value_name = "FILE",
        env = "NETCRM_CONTACTS",
        required_unless_present = "init_config"
    )]
    pub contacts: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Defaults to the config file setting, or networking_report.md
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Reference instant for the analysis (RFC 3339)
    ///
    /// Defaults to the current time. Pin it for reproducible reports.
    #[arg(long, value_name = "INSTANT")]
    pub now: Option<DateTime<Utc>>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .netcrm.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of insights in the report
    #[arg(long, value_name = "COUNT")]
    pub max_insights: Option<usize>,

    /// Fail if the networking score is below this value
    ///
    /// Exit code 2 when the score is under the threshold.
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<u32>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and validate the snapshot without analyzing it
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .netcrm.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        match self.contacts {
            None => return Err("A contact snapshot is required (--contacts FILE)".to_string()),
            Some(ref path) if !path.is_file() => {
                return Err(format!(
                    "Contact snapshot does not exist or is not a file: {}",
                    path.display()
                ));
            }
            Some(_) => {}
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(score) = self.min_score {
            if score > 100 {
                return Err("Minimum score must be between 0 and 100".to_string());
            }
        }

        if self.max_insights == Some(0) {
            return Err("Max insights must be at least 1".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn make_args(contacts: PathBuf) -> Args {
        Args {
            contacts: Some(contacts),
            output: None,
            format: OutputFormat::Markdown,
            now: None,
            config: None,
            max_insights: None,
            min_score: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "netcrm",
            "--contacts",
            "contacts.json",
            "--format",
            "json",
            "--now",
            "2026-03-01T09:00:00Z",
            "--min-score",
            "60",
        ])
        .unwrap();

        assert_eq!(args.contacts, Some(PathBuf::from("contacts.json")));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.now.unwrap().to_rfc3339(), "2026-03-01T09:00:00+00:00");
        assert_eq!(args.min_score, Some(60));
    }

    #[test]
    fn test_init_config_needs_no_contacts() {
        let args = Args::try_parse_from(["netcrm", "--init-config"]).unwrap();
        assert!(args.init_config);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_snapshot() {
        let args = make_args(PathBuf::from("/no/such/contacts.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args(file.path().to_path_buf());
        assert!(args.validate().is_ok());

        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_score_range() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args(file.path().to_path_buf());
        args.min_score = Some(101);
        assert!(args.validate().is_err());

        args.min_score = Some(100);
        args.max_insights = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args(file.path().to_path_buf());
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
