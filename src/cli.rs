//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// SkillScout - skill recommendations from your conversation history
///
/// Reads a JSON array of conversation summaries (title + summary),
/// classifies them by keyword, and reports which skills are worth
/// building next.
///
/// Examples:
///   skillscout conversations.json
///   cat conversations.json | skillscout
///   skillscout conversations.json --format json -o report.json
///   skillscout conversations.json --summary-only
///   skillscout --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// JSON file with conversation summaries
    ///
    /// Reads standard input when omitted or set to "-".
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    ///
    /// Prints to standard output when not specified.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT", env = "SKILLSCOUT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Date format for the report header (strftime syntax)
    #[arg(long, value_name = "FMT")]
    pub date_format: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .skillscout.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the analysis counts only, without recommendations
    ///
    /// Always plain text; cannot be combined with --format json.
    #[arg(long)]
    pub summary_only: bool,

    /// Generate a default .skillscout.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
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

    /// Input file path, or `None` for standard input.
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.summary_only && self.format == Some(OutputFormat::Json) {
            return Err(
                "--summary-only prints plain text and cannot be combined with --format json"
                    .to_string(),
            );
        }

        if let Some(path) = self.input_path() {
            if !path.exists() {
                return Err(format!("Input file does not exist: {}", path.display()));
            }
            if !path.is_file() {
                return Err(format!("Input path is not a file: {}", path.display()));
            }
        }

        if let Some(ref date_format) = self.date_format {
            if date_format.trim().is_empty() {
                return Err("Date format must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is `[general] verbose` from the config file;
    /// `--quiet` wins over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
