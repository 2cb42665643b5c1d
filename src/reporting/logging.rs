use crate::config::Config;
use crate::data::{FilterSelection, LoadStats};
use log::{LevelFilter, debug, error, info, warn};
use std::path::Path;

/// Level forced onto the logger, or `None` to keep the `RUST_LOG` directives
pub fn level_override(verbose: bool, quiet: bool, rust_log_set: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if rust_log_set {
        None
    } else if verbose {
        Some(LevelFilter::Debug)
    } else {
        Some(LevelFilter::Off)
    }
}

fn rust_log_set() -> bool {
    std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some_and(|v| !v.is_empty())
}

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = level_override(verbose, quiet, rust_log_set());

    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log the effective configuration
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: data={}, format={}, head_rows={}",
        config.data_path(),
        config.output_format(),
        config.head_rows()
    );
    debug!(
        "Outputs: report={}, dashboard={}",
        config.report_path(),
        config.dashboard_path()
    );
}

pub fn log_load_start<P: AsRef<Path>>(path: P) {
    info!("Loading dataset from {}", path.as_ref().display());
}

/// Log the cleaning counters of a finished load
pub fn log_load_complete(rows: usize, stats: &LoadStats, duration_ms: u128) {
    info!(
        "✅ Loaded {rows} records ({} raw rows) in {duration_ms}ms",
        stats.raw_rows
    );
    if stats.duplicate_rows > 0 {
        debug!("  dropped {} duplicate row(s)", stats.duplicate_rows);
    }
    if stats.coerced_to_missing > 0 {
        debug!(
            "  coerced {} non-numeric value(s) to missing",
            stats.coerced_to_missing
        );
    }
    if stats.invalid_years > 0 {
        warn!(
            "  dropped {} row(s) with an invalid year",
            stats.invalid_years
        );
    }
}

pub fn log_cache_hit<P: AsRef<Path>>(path: P, hits: usize) {
    debug!("Cache hit #{hits} for {}", path.as_ref().display());
}

pub fn log_cache_miss<P: AsRef<Path>>(path: P, misses: usize) {
    debug!("Cache miss #{misses} for {}", path.as_ref().display());
}

/// Log how many records survived a selection
pub fn log_filter_result(selection: &FilterSelection, kept: usize, total: usize) {
    if kept == 0 {
        warn!("Selection {selection} matched no records (of {total})");
    } else {
        info!("Selection {selection} matched {kept} of {total} records");
    }
}

pub fn log_render<P: AsRef<Path>>(kind: &str, path: P, charts: usize) {
    info!(
        "Rendered {kind} with {charts} chart(s) to {}",
        path.as_ref().display()
    );
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
