//! RoiDash - Influencer Campaign ROI Dashboard
//!
//! A CLI tool that loads influencer campaign records from CSV, filters
//! them by platform, product, category and gender, and renders revenue,
//! payout and ROAS aggregates as a Markdown or JSON dashboard.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (missing input, missing column, malformed CSV, bad config, etc.)

mod analysis;
mod cli;
mod config;
mod data;
mod error;
mod models;
mod report;
mod session;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, ReportFormat};
use config::{Config, CONFIG_FILE_NAME};
use error::PipelineError;
use indicatif::{ProgressBar, ProgressStyle};
use models::{ReportMetadata, Summary};
use session::{RenderOptions, Session};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Load configuration first so `general.verbose` sets the log level
    let (config, config_path) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(config.log_level(args.quiet));

    info!("RoiDash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_path {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    if let Err(e) = run_dashboard(args, config) {
        error!("Dashboard failed: {:#}", e);
        match e.downcast_ref::<PipelineError>() {
            Some(PipelineError::MissingInputFile { default_file }) => {
                eprintln!(
                    "\n⚠️  Please provide a campaign CSV with --input (default file {} not found).",
                    default_file.display()
                );
            }
            _ => eprintln!("\n❌ Error: {:#}", e),
        }
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .roidash.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the default file, filters, and report layout.");
    Ok(())
}

/// Initialize logging. `RUST_LOG` takes precedence over the configured level.
fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete load, filter, summarize and render workflow.
fn run_dashboard(args: Args, config: Config) -> Result<()> {
    // Step 1: Load and clean the data once
    let default_file = PathBuf::from(&config.data.default_file);
    let source = data::resolve_source(args.input.as_deref(), &default_file)?;
    let session = load_session(source, args.quiet)?;

    if !args.quiet {
        println!("📥 Data loaded from {}", session.source());
        println!("   Rows after cleaning: {}", session.table().len());
    }

    // Handle --list-options: show filter values and exit
    if args.list_options {
        print_options(&session);
        return Ok(());
    }

    // Step 2: Filter and summarize
    let selection = session.selection(&config.filters);
    let options = RenderOptions {
        top_n: config.report.top_n,
        preview_rows: config.data.preview_rows,
    };
    let view = session.run(&selection, options);

    if view.filtered.is_empty() {
        warn!("Current filters match no rows");
    } else if view.summary.roas.is_undefined() {
        warn!("Total payout is zero, ROAS is undefined");
    }

    // Step 3: Export the filtered table if requested
    let export = match args.export {
        Some(ref path) => {
            let path = path
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.report.export_file));
            Some(report::export_csv(&view.filtered, &path)?)
        }
        None => None,
    };

    // Step 4: Build and save the report
    let metadata = ReportMetadata {
        source: session.source().clone(),
        generated_at: Utc::now(),
        rows_cleaned: session.table().len(),
        rows_filtered: view.filtered.len(),
        export,
    };
    let dashboard = report::Report::new(metadata, view);

    let output = match config.report.format {
        ReportFormat::Json => report::generate_json_report(&dashboard)?,
        ReportFormat::Markdown => report::generate_markdown_report(&dashboard, &config.report),
    };

    let output_path = output_path(&config);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    if !args.quiet {
        print_summary(&dashboard.view.summary, dashboard.metadata.rows_filtered);
        if let Some(ref export) = dashboard.metadata.export {
            println!("   Filtered data: {}", export.path.display());
        }
        println!(
            "\n✅ Dashboard complete! Report saved to: {}",
            output_path.display()
        );
    }

    Ok(())
}

/// Load configuration from file or use defaults, merged with the
/// command-line flags. Also returns the file it came from, if any.
fn load_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    let (mut config, path) = match args.config {
        // Explicit config path must load
        Some(ref config_path) => (Config::load(config_path)?, Some(config_path.clone())),
        None => match Config::load_default() {
            Ok(Some(config)) => (config, Some(PathBuf::from(CONFIG_FILE_NAME))),
            Ok(None) => (Config::default(), None),
            Err(e) => {
                eprintln!("⚠️  Ignoring {}: {:#}", CONFIG_FILE_NAME, e);
                (Config::default(), None)
            }
        },
    };

    config.merge_with_args(args);
    Ok((config, path))
}

/// Load the session behind a spinner.
fn load_session(source: models::DataSource, quiet: bool) -> Result<Session> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    spinner.set_message(format!("Loading {}", source.path().display()));

    let result = Session::load(source);
    spinner.finish_and_clear();

    result.context("Failed to load campaign data")
}

/// The report path, with a `.json` extension for JSON output
/// when the configured name ends in `.md`.
fn output_path(config: &Config) -> PathBuf {
    let path = PathBuf::from(&config.general.output);
    match config.report.format {
        ReportFormat::Json if path.extension().is_some_and(|e| e == "md") => {
            path.with_extension("json")
        }
        _ => path,
    }
}

/// Print the available filter values.
fn print_options(session: &Session) {
    println!("\n🔎 Filter options:");
    for (dimension, values) in session.options() {
        println!("   {}: {}", dimension, values.join(", "));
    }
}

/// Print the four headline metrics.
fn print_summary(summary: &Summary, rows: usize) {
    println!("\n📊 Campaign Performance:");
    println!("   Rows matching filters: {}", rows);
    println!(
        "   Total Revenue: {}",
        report::format::format_currency(summary.total_revenue)
    );
    println!("   Total Orders: {}", summary.total_orders);
    println!(
        "   Total Payout: {}",
        report::format::format_currency(summary.total_payout)
    );
    println!("   ROAS: {}", summary.roas);
}
