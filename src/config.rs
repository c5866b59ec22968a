//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.skillscout.toml` files. Keyword sets and rule thresholds are
//! compiled in and cannot be configured.

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".skillscout.toml";

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
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path (standard output when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty_json: bool,

    /// strftime pattern for the analysis date in the Markdown header.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty_json: true,
            date_format: default_date_format(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "%B %d, %Y".to_string()
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

    /// Try to load `.skillscout.toml` from a directory.
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
            self.general.output = Some(output.display().to_string());
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref date_format) = args.date_format {
            self.report.date_format = date_format.clone();
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, None);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert!(config.report.pretty_json);
        assert_eq!(config.report.date_format, "%B %d, %Y");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "skills.md"
verbose = true

[report]
format = "json"
pretty_json = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output.as_deref(), Some("skills.md"));
        assert!(config.general.verbose);
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(!config.report.pretty_json);
        assert_eq!(config.report.date_format, "%B %d, %Y");
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config: Config = toml::from_str("[report]\nformat = \"json\"\n").unwrap();
        let args = Args::try_parse_from([
            "skillscout",
            "--format",
            "markdown",
            "--date-format",
            "%Y-%m-%d",
            "-o",
            "out.md",
        ])
        .unwrap();

        config.merge_with_args(&args);
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert_eq!(config.report.date_format, "%Y-%m-%d");
        assert_eq!(config.general.output.as_deref(), Some("out.md"));
    }

    #[test]
    fn test_config_verbose_enables_debug_logging() {
        let mut config: Config = toml::from_str("[general]\nverbose = true\n").unwrap();
        let args = Args::try_parse_from(["skillscout"]).unwrap();

        config.merge_with_args(&args);
        assert!(config.general.verbose);
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[general]\nverbose = true\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert!(config.general.verbose);

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[general\n").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));
        assert!(toml_str.contains("format = \"markdown\""));
    }
}
