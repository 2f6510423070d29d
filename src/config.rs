//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.roidash.toml` files.

use crate::cli::ReportFormat;
use crate::models::Dimension;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".roidash.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Input data settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Filter selections applied before aggregation.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default report output path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "roi_dashboard.md".to_string()
}

/// Input data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// File used when no input is given on the command line.
    #[serde(default = "default_data_file")]
    pub default_file: String,

    /// Rows shown in the raw data preview.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_file: default_data_file(),
            preview_rows: default_preview_rows(),
        }
    }
}

fn default_data_file() -> String {
    "influencer_marketing_roi_simulated.csv".to_string()
}

fn default_preview_rows() -> usize {
    crate::session::DEFAULT_PREVIEW_ROWS
}

/// Allowed values per dimension. `None` selects every value present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genders: Option<Vec<String>>,
}

impl FiltersConfig {
    /// Configured values for a dimension, if any.
    pub fn get(&self, dimension: Dimension) -> Option<&Vec<String>> {
        match dimension {
            Dimension::Platform => self.platforms.as_ref(),
            Dimension::Product => self.products.as_ref(),
            Dimension::Category => self.categories.as_ref(),
            Dimension::Gender => self.genders.as_ref(),
        }
    }
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ReportFormat,

    /// Length of the influencer rankings.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// File name used by `--export` when no path is given.
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Include the raw data preview section.
    #[serde(default = "default_true")]
    pub include_preview: bool,

    /// Include the insights summary section.
    #[serde(default = "default_true")]
    pub include_insights: bool,

    /// Width in characters of the longest bar in the platform chart.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            top_n: default_top_n(),
            export_file: default_export_file(),
            include_preview: true,
            include_insights: true,
            bar_width: default_bar_width(),
        }
    }
}

fn default_top_n() -> usize {
    crate::analysis::DEFAULT_TOP_N
}

fn default_export_file() -> String {
    "filtered_influencer_data.csv".to_string()
}

fn default_true() -> bool {
    true
}

fn default_bar_width() -> usize {
    30
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
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(top_n) = args.top_n {
            self.report.top_n = top_n;
        }
        if let Some(ref default_file) = args.default_file {
            self.data.default_file = default_file.display().to_string();
        }
        if let Some(rows) = args.preview_rows {
            self.data.preview_rows = rows;
        }

        // Filters - only override dimensions given on the command line
        if let Some(ref values) = args.platform {
            self.filters.platforms = Some(values.clone());
        }
        if let Some(ref values) = args.product {
            self.filters.products = Some(values.clone());
        }
        if let Some(ref values) = args.category {
            self.filters.categories = Some(values.clone());
        }
        if let Some(ref values) = args.gender {
            self.filters.genders = Some(values.clone());
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
        if args.no_preview {
            self.report.include_preview = false;
        }
        if args.no_insights {
            self.report.include_insights = false;
        }
    }

    /// Log level for the merged settings; `quiet` wins over `verbose`.
    pub fn log_level(&self, quiet: bool) -> tracing::Level {
        if quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
