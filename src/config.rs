//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.netcrm.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".netcrm.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

fn default_output() -> String {
    "networking_report.md".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum number of insights shown.
    #[serde(default = "default_max_insights")]
    pub max_insights: usize,

    /// Include the 8-week follow-up trend table.
    #[serde(default = "default_true")]
    pub include_trend: bool,

    /// Include the top companies table.
    #[serde(default = "default_true")]
    pub include_companies: bool,

    /// Include the overdue and upcoming follow-up lists.
    #[serde(default = "default_true")]
    pub include_action_lists: bool,

    /// Maximum contacts listed per action list.
    #[serde(default = "default_action_list_limit")]
    pub action_list_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_insights: default_max_insights(),
            include_trend: true,
            include_companies: true,
            include_action_lists: true,
            action_list_limit: default_action_list_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_insights() -> usize {
    3
}

fn default_action_list_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings when given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }

        if let Some(max_insights) = args.max_insights {
            self.report.max_insights = max_insights;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
