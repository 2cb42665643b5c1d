//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{defaults, output_formats, paths};
use crate::core::error::{EsgError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// CSV dataset to load
    pub data_path: Option<String>,

    /// Where the batch report is written
    pub report_path: Option<String>,

    /// Where the dashboard is written
    pub dashboard_path: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Rows shown in the dataset preview
    pub head_rows: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: Some(paths::DEFAULT_DATA_FILE.to_string()),
            report_path: Some(paths::DEFAULT_REPORT_FILE.to_string()),
            dashboard_path: Some(paths::DEFAULT_DASHBOARD_FILE.to_string()),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            head_rows: Some(defaults::HEAD_ROWS),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for unset keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            EsgError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let parsed: Config = toml::from_str(&content).map_err(|e| {
            EsgError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::default().overlay(parsed);
        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in the current directory or its parents
    pub fn load_from_standard_locations() -> Self {
        Self::load_from_dir(Path::new("."))
    }

    /// Look for the config file in `dir` and up to three parent directories
    pub fn load_from_dir(dir: &Path) -> Self {
        for candidate in Self::candidate_paths(dir) {
            if !candidate.is_file() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => {
                    debug!("Using config file {}", candidate.display());
                    return config;
                }
                Err(e) => warn!("Ignoring config file {}: {e}", candidate.display()),
            }
        }

        Self::default()
    }

    fn candidate_paths(dir: &Path) -> Vec<PathBuf> {
        (0..=paths::CONFIG_PARENT_DEPTH)
            .map(|depth| dir.join("../".repeat(depth)).join(paths::CONFIG_FILE_NAME))
            .collect()
    }

    /// Fill every unset field of `other` from `self`
    fn overlay(self, other: Config) -> Self {
        Self {
            data_path: other.data_path.or(self.data_path),
            report_path: other.report_path.or(self.report_path),
            dashboard_path: other.dashboard_path.or(self.dashboard_path),
            output_format: other.output_format.or(self.output_format),
            verbose: other.verbose.or(self.verbose),
            head_rows: other.head_rows.or(self.head_rows),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Inputs & outputs
        if let Some(ref data_path) = cli_config.data_path {
            self.data_path = Some(data_path.clone());
        }
        if let Some(ref report_path) = cli_config.report_path {
            self.report_path = Some(report_path.clone());
        }
        if let Some(ref dashboard_path) = cli_config.dashboard_path {
            self.dashboard_path = Some(dashboard_path.clone());
        }
        if let Some(head_rows) = cli_config.head_rows {
            self.head_rows = Some(head_rows);
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    pub fn data_path(&self) -> &str {
        self.data_path.as_deref().unwrap_or(paths::DEFAULT_DATA_FILE)
    }

    pub fn report_path(&self) -> &str {
        self.report_path
            .as_deref()
            .unwrap_or(paths::DEFAULT_REPORT_FILE)
    }

    pub fn dashboard_path(&self) -> &str {
        self.dashboard_path
            .as_deref()
            .unwrap_or(paths::DEFAULT_DASHBOARD_FILE)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn head_rows(&self) -> usize {
        self.head_rows.unwrap_or(defaults::HEAD_ROWS)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate output format
        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(EsgError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        // Validate preview size
        if let Some(rows) = self.head_rows
            && !(1..=defaults::MAX_HEAD_ROWS).contains(&rows)
        {
            return Err(EsgError::Config(format!(
                "head_rows of {rows} is out of range. Expected a value between 1-{}.",
                defaults::MAX_HEAD_ROWS
            )));
        }

        // Validate paths
        for (name, value) in [
            ("data_path", &self.data_path),
            ("report_path", &self.report_path),
            ("dashboard_path", &self.dashboard_path),
        ] {
            if let Some(path) = value
                && path.trim().is_empty()
            {
                return Err(EsgError::Config(format!(
                    "{name} cannot be empty. Expected a file path."
                )));
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Inputs & outputs
    pub data_path: Option<String>,      // --data
    pub report_path: Option<String>,    // report --output
    pub dashboard_path: Option<String>, // dashboard --output
    pub head_rows: Option<usize>,       // report --head

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
