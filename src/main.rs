//! SkillScout - skill recommendations from conversation history
//!
//! A CLI tool that classifies conversation summaries by keyword,
//! aggregates the counts and reports the skills most worth building.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable input, bad config, write failure, etc.)

mod analysis;
mod cli;
mod config;
mod input;
mod models;
mod recommend;
mod report;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, Utc};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::{ConversationRecord, SkillReport};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
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

    // Load configuration before logging so `[general] verbose` applies
    let (mut config, config_source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("SkillScout v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_source(&config_source);

    if let Err(e) = run(&args, &config) {
        error!("Analysis failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .skillscout.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    eprintln!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging at the given level.
///
/// Logs go to stderr so the report on stdout stays clean.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete pipeline: load, analyze, recommend, render, write.
fn run(args: &Args, config: &Config) -> Result<()> {
    let records = load_records(args)?;
    info!("Loaded {} conversations", records.len());

    let summary = analysis::analyze_conversations(&records);

    if args.summary_only {
        let text = analysis::generate_summary_text(&summary);
        return write_output(&text, config.general.output.as_deref());
    }

    let recommendations = recommend::generate_recommendations(&summary);
    info!("{} skill recommendations generated", recommendations.len());

    let output = match config.report.format {
        OutputFormat::Markdown => {
            let analysis_date = format_date(Local::now(), &config.report.date_format)?;
            report::generate_markdown_report(&summary, &recommendations, &analysis_date)
        }
        OutputFormat::Json => {
            let report = SkillReport::new(summary, recommendations, Utc::now());
            report::generate_json_report(&report, config.report.pretty_json)?
        }
    };

    write_output(&output, config.general.output.as_deref())
}

/// Load conversation records from the input file or standard input.
fn load_records(args: &Args) -> Result<Vec<ConversationRecord>> {
    match args.input_path() {
        Some(path) => {
            info!("Reading conversations from: {}", path.display());
            Ok(input::load_from_path(path)?)
        }
        None => {
            info!("Reading conversations from standard input");
            Ok(input::load_from_reader(std::io::stdin().lock())?)
        }
    }
}

/// Format the report date, rejecting invalid strftime patterns.
fn format_date(date: DateTime<Local>, pattern: &str) -> Result<String> {
    let mut formatted = String::new();
    write!(formatted, "{}", date.format(pattern))
        .map_err(|_| anyhow!("Invalid date format: {:?}", pattern))?;
    Ok(formatted)
}

/// Write the rendered output to a file, or stdout when no path is set.
fn write_output(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write report to {}", path))?;
            info!("Report saved to: {}", path);
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Where the effective configuration came from.
#[derive(Debug)]
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Defaults,
    Invalid(String),
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so the source is reported afterwards
/// through [`log_config_source`].
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Defaults)),
        Err(e) => Ok((Config::default(), ConfigSource::Invalid(format!("{:#}", e)))),
    }
}

fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
        ConfigSource::Defaults => debug!("No config file found, using defaults"),
        ConfigSource::Invalid(e) => warn!("Failed to load config: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date() {
        let date = Local.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
        assert_eq!(format_date(date, "%B %d, %Y").unwrap(), "January 05, 2026");
        assert_eq!(format_date(date, "%Y-%m-%d").unwrap(), "2026-01-05");
    }

    #[test]
    fn test_format_date_rejects_invalid_pattern() {
        let date = Local.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap();
        assert!(format_date(date, "%Q").is_err());
    }

    #[test]
    fn test_fixture_pipeline() {
        let records =
            input::parse_records(include_str!("../fixtures/conversations.json")).unwrap();
        let summary = analysis::analyze_conversations(&records);
        let recommendations = recommend::generate_recommendations(&summary);

        assert_eq!(summary.total_conversations, records.len());
        let ranks: Vec<_> = recommendations.iter().map(|r| r.rank).collect();
        assert!(ranks.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(ranks.iter().all(|rank| (1..=5).contains(rank)));

        let markdown = report::generate_markdown_report(&summary, &recommendations, "today");
        assert!(markdown.contains("**Conversations Analyzed:** 9"));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");
        let path_str = path.to_str().unwrap();

        write_output("# Report", Some(path_str)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report");
    }
}
