use clap::Parser;
use esgdash::config::{CliConfig, Config};
use esgdash::core::constants::output_formats;
use esgdash::data::DatasetCache;
use esgdash::reporting::logging;
use esgdash::reporting::{HtmlReport, ReportData};
use esgdash::ui::output;
use esgdash::ui::session::generated_timestamp;
use esgdash::ui::{
    Cli, Commands, DashboardSession, ProgressReporter, RenderSettings, cli_to_config,
    fetch_dataset, selection_from_flags,
};

use std::path::{Path, PathBuf};

fn main() {
    let cli = Cli::parse();

    match run_esgdash_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main logic extracted from main() for testing
pub fn run_esgdash_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config);

    match &cli.command {
        Commands::Report { .. } => run_report_logic(&config, &output_settings),
        Commands::Dashboard {
            industry,
            region,
            years,
            interactive,
            ..
        } => run_dashboard_logic(
            &config,
            &output_settings,
            &DashboardFilters {
                industries: industry,
                regions: region,
                years: years.as_deref(),
                interactive: *interactive,
            },
        ),
    }
}

/// Load configuration from --config, the standard locations or defaults, then apply CLI flags
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
#[derive(Debug)]
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.is_verbose();
    let output_format = config.output_format().to_string();
    let show_progress =
        !quiet && !cli_config.no_progress && output_format != output_formats::JSON;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Filter flags of the dashboard subcommand
pub struct DashboardFilters<'a> {
    pub industries: &'a [String],
    pub regions: &'a [String],
    pub years: Option<&'a str>,
    pub interactive: bool,
}

/// Load the whole dataset, write the HTML report and print the text summary
pub fn run_report_logic(
    config: &Config,
    settings: &OutputSettings,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut cache = DatasetCache::new();
    let mut progress = ProgressReporter::new(settings.show_progress);
    let dataset = fetch_dataset(&mut cache, Path::new(config.data_path()), &mut progress)?;

    let data = ReportData::from_dataset(&dataset, config.head_rows(), generated_timestamp());
    let report_path = PathBuf::from(config.report_path());

    progress.start_rendering("report");
    HtmlReport::generate_report(&data, &report_path).inspect_err(|_| progress.abandon())?;
    progress.finish_rendering(&report_path);
    logging::log_render("report", &report_path, data.chart_count());

    output::display_report(
        &data,
        &settings.output_format,
        settings.quiet,
        config.report_path(),
    );
    Ok(0)
}

/// Render the dashboard for the flag selection, then optionally hand over to the prompts
pub fn run_dashboard_logic(
    config: &Config,
    settings: &OutputSettings,
    filters: &DashboardFilters<'_>,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut session = DashboardSession::new(
        config.data_path(),
        RenderSettings {
            output_path: PathBuf::from(config.dashboard_path()),
            output_format: settings.output_format.clone(),
            quiet: settings.quiet,
            show_progress: settings.show_progress,
        },
    );

    let dataset = session.dataset()?;
    let selection = selection_from_flags(
        &dataset,
        filters.industries,
        filters.regions,
        filters.years,
    )?;

    if filters.interactive {
        session.run_interactive(selection)?;
    } else {
        session.render(&selection)?;
    }
    Ok(0)
}
