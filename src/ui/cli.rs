// Command-line interface definitions and parsing for esgdash

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // Input
    /// CSV dataset to analyse (default: company_esg_financial_dataset.csv)
    #[arg(long, value_name = "PATH", global = true, help_heading = "Input")]
    pub data: Option<String>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, global = true, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable progress spinners
    #[arg(long, global = true, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the batch HTML report over the whole dataset
    Report {
        /// Where to write the HTML report (default: esg_report.html)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<String>,

        /// Rows shown in the dataset preview (default: 5)
        #[arg(long, value_name = "ROWS")]
        head: Option<usize>,
    },
    /// Generate the filtered dashboard, optionally re-filtering interactively
    Dashboard {
        /// Where to write the HTML dashboard (default: esg_dashboard.html)
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<String>,

        /// Industry to include (repeatable, default: all)
        #[arg(long, value_name = "NAME")]
        industry: Vec<String>,

        /// Region to include (repeatable, default: all)
        #[arg(long, value_name = "NAME")]
        region: Vec<String>,

        /// Inclusive year range, e.g. 2015..2020 (default: all years)
        #[arg(long, value_name = "RANGE")]
        years: Option<String>,

        /// Choose filters with interactive prompts
        #[arg(short = 'i', long)]
        interactive: bool,
    },
}

/// Collect the configuration-relevant flags of a parsed command line
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let mut cli_config = CliConfig {
        data_path: non_empty(cli.data.as_deref()),
        ..Default::default()
    };

    match &cli.command {
        Commands::Report { output, head } => {
            cli_config.report_path = non_empty(output.as_deref());
            cli_config.head_rows = *head;
        }
        Commands::Dashboard { output, .. } => {
            cli_config.dashboard_path = non_empty(output.as_deref());
        }
    }

    // Output & format
    cli_config.quiet = cli.quiet;
    cli_config.verbose = cli.verbose;
    cli_config.no_progress = cli.no_progress;
    cli_config.output_format = cli.format.clone();

    // Configuration
    cli_config.config_file = cli.config.clone();
    cli_config.no_config = cli.no_config;

    cli_config
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
