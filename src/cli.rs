//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// RoiDash - influencer campaign ROI dashboard
///
/// Load a CSV of influencer campaign posts, filter it by platform,
/// product, category and gender, and report revenue, orders, payout,
/// ROAS and influencer rankings.
///
/// Examples:
///   roidash --input campaigns.csv
///   roidash --input campaigns.csv --platform Instagram,YouTube --export
///   roidash --gender Female --format json --output dashboard.json
///   roidash --list-options
///   roidash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// CSV file with campaign records
    ///
    /// If not specified, the default file from the config is used
    /// (influencer_marketing_roi_simulated.csv).
    #[arg(short, long, value_name = "FILE", env = "ROIDASH_INPUT")]
    pub input: Option<PathBuf>,

    /// Fallback CSV used when --input is not given
    #[arg(long, value_name = "FILE")]
    pub default_file: Option<PathBuf>,

    /// Output file path for the dashboard report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ReportFormat>,

    /// Write the filtered table as CSV
    ///
    /// Without a value, writes filtered_influencer_data.csv.
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Platforms to include (comma-separated, default: all)
    ///
    /// Pass an empty value (--platform "") to select none.
    #[arg(long, value_name = "VALUES", value_delimiter = ',')]
    pub platform: Option<Vec<String>>,

    /// Products to include (comma-separated, default: all)
    #[arg(long, value_name = "VALUES", value_delimiter = ',')]
    pub product: Option<Vec<String>>,

    /// Influencer categories to include (comma-separated, default: all)
    #[arg(long, value_name = "VALUES", value_delimiter = ',')]
    pub category: Option<Vec<String>>,

    /// Genders to include (comma-separated, default: all)
    #[arg(long, value_name = "VALUES", value_delimiter = ',')]
    pub gender: Option<Vec<String>>,

    /// Number of influencers in each ranking
    #[arg(long, value_name = "COUNT")]
    pub top_n: Option<usize>,

    /// Number of raw rows in the data preview
    #[arg(long, value_name = "COUNT")]
    pub preview_rows: Option<usize>,

    /// Omit the raw data preview from the report
    #[arg(long)]
    pub no_preview: bool,

    /// Omit the insights summary from the report
    #[arg(long)]
    pub no_insights: bool,

    /// Print the available filter values and exit
    #[arg(long)]
    pub list_options: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .roidash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .roidash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
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

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top_n == Some(0) {
            return Err("Top N must be at least 1".to_string());
        }

        // Validate input file if provided
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        Ok(())
    }

}
