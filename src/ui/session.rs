//! Dashboard session: dataset fetching, filter selection and re-rendering
//!
//! A session owns the dataset cache. Every render goes back through the cache,
//! so an unchanged input file is loaded once no matter how many times the
//! selection changes, while an edited file is picked up on the next round.

use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::core::error::Result;
use crate::data::{Dataset, DatasetCache, FilterSelection, YearRange};
use crate::reporting::logging;
use crate::reporting::{DashboardData, HtmlDashboard};
use crate::ui::color::{Colors, colorize, heading};
use crate::ui::output::display_dashboard;
use crate::ui::progress::ProgressReporter;

/// Local time stamped into generated pages
pub fn generated_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Fetch `path` through the cache, with spinner and load logging on a miss
pub fn fetch_dataset(
    cache: &mut DatasetCache,
    path: &Path,
    progress: &mut ProgressReporter,
) -> Result<Arc<Dataset>> {
    let misses_before = cache.misses();
    let started = Instant::now();

    logging::log_load_start(path);
    progress.start_loading(path);
    let dataset = cache.get_or_load(path).inspect_err(|_| progress.abandon())?;
    progress.finish_loading(dataset.len());

    if cache.misses() > misses_before {
        logging::log_cache_miss(path, cache.misses());
        logging::log_load_complete(
            dataset.len(),
            &dataset.stats(),
            started.elapsed().as_millis(),
        );
    } else {
        logging::log_cache_hit(path, cache.hits());
    }

    Ok(dataset)
}

/// Names in `requested` that do not occur in `known`
pub fn unknown_names<'a>(requested: &'a [String], known: &[String]) -> Vec<&'a str> {
    requested
        .iter()
        .filter(|name| !known.contains(name))
        .map(String::as_str)
        .collect()
}

/// Warning for filter names that stay in the selection but match no record
pub fn absent_names_warning(singular: &str, plural: &str, absent: &[&str]) -> String {
    let noun = if absent.len() == 1 { singular } else { plural };
    format!("{noun} not present in the data: {}", absent.join(", "))
}

/// Build a selection from command-line flags; empty flag lists mean "all"
pub fn selection_from_flags(
    dataset: &Dataset,
    industries: &[String],
    regions: &[String],
    years: Option<&str>,
) -> Result<FilterSelection> {
    let mut selection = FilterSelection::all(dataset);

    if !industries.is_empty() {
        let unknown = unknown_names(industries, &dataset.industries());
        if !unknown.is_empty() {
            logging::log_warning(&absent_names_warning("Industry", "Industries", &unknown));
        }
        selection = selection.with_industries(industries.iter().cloned());
    }

    if !regions.is_empty() {
        let unknown = unknown_names(regions, &dataset.regions());
        if !unknown.is_empty() {
            logging::log_warning(&absent_names_warning("Region", "Regions", &unknown));
        }
        selection = selection.with_regions(regions.iter().cloned());
    }

    if let Some(range) = years {
        selection = selection.with_years(YearRange::parse(range)?);
    }

    Ok(selection)
}

/// Pre-checked state for a multi-select over `options`
pub fn default_checks(options: &[String], chosen: &BTreeSet<String>) -> Vec<bool> {
    options.iter().map(|option| chosen.contains(option)).collect()
}

/// Map picked indices back to option names, ignoring out-of-range indices
pub fn selected_from_indices(options: &[String], indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .filter_map(|&i| options.get(i).cloned())
        .collect()
}

#[allow(clippy::ptr_arg)]
fn validate_year_range(input: &String) -> std::result::Result<(), String> {
    YearRange::parse(input).map(|_| ()).map_err(|e| e.to_string())
}

/// Output settings shared by every render of a session
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub output_path: PathBuf,
    pub output_format: String,
    pub quiet: bool,
    pub show_progress: bool,
}

/// One dashboard session over a single input file
pub struct DashboardSession {
    cache: DatasetCache,
    data_path: PathBuf,
    settings: RenderSettings,
    theme: ColorfulTheme,
}

impl DashboardSession {
    pub fn new(data_path: impl Into<PathBuf>, settings: RenderSettings) -> Self {
        Self::with_cache(DatasetCache::new(), data_path, settings)
    }

    pub fn with_cache(
        cache: DatasetCache,
        data_path: impl Into<PathBuf>,
        settings: RenderSettings,
    ) -> Self {
        Self {
            cache,
            data_path: data_path.into(),
            settings,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Current dataset, loaded or served from the cache
    pub fn dataset(&mut self) -> Result<Arc<Dataset>> {
        let mut progress = ProgressReporter::new(self.settings.show_progress);
        fetch_dataset(&mut self.cache, &self.data_path, &mut progress)
    }

    /// Filter, aggregate and write the dashboard for `selection`
    pub fn render(&mut self, selection: &FilterSelection) -> Result<DashboardData> {
        let dataset = self.dataset()?;
        let data = DashboardData::build(&dataset, selection, generated_timestamp());
        logging::log_filter_result(selection, data.summary.records, data.total_records);

        let mut progress = ProgressReporter::new(self.settings.show_progress);
        progress.start_rendering("dashboard");
        HtmlDashboard::generate_dashboard(&data, &self.settings.output_path)
            .inspect_err(|_| progress.abandon())?;
        progress.finish_rendering(&self.settings.output_path);
        logging::log_render("dashboard", &self.settings.output_path, data.chart_count());

        display_dashboard(
            &data,
            &self.settings.output_format,
            self.settings.quiet,
            &self.settings.output_path.display().to_string(),
        );
        Ok(data)
    }

    /// Render `initial`, then keep prompting for a new selection until the user stops
    pub fn run_interactive(&mut self, initial: FilterSelection) -> Result<usize> {
        self.display_welcome();

        let mut selection = initial;
        let mut rounds = 0;
        loop {
            self.render(&selection)?;
            rounds += 1;

            if !self.should_continue()? {
                break;
            }
            let dataset = self.dataset()?;
            selection = self.prompt_selection(&dataset, &selection)?;
        }

        println!(
            "\n{} {}",
            colorize("✓", Colors::BRIGHT_GREEN),
            colorize(
                &format!(
                    "Dashboard rendered {rounds} time(s) to {}",
                    self.settings.output_path.display()
                ),
                Colors::GREEN
            )
        );
        Ok(rounds)
    }

    fn display_welcome(&self) {
        println!(
            "\n{}",
            heading("📊 Interactive ESG dashboard", Colors::BRIGHT_CYAN)
        );
        println!(
            "{}\n",
            colorize(
                &format!(
                    "Each change re-renders {} from {}",
                    self.settings.output_path.display(),
                    self.data_path.display()
                ),
                Colors::DIM
            )
        );
    }

    fn should_continue(&self) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Change the selection")
            .default(true)
            .interact()?)
    }

    fn prompt_selection(
        &self,
        dataset: &Dataset,
        current: &FilterSelection,
    ) -> Result<FilterSelection> {
        let industries = self.pick("🏭 Industries", &dataset.industries(), &current.industries)?;
        let regions = self.pick("🌍 Regions", &dataset.regions(), &current.regions)?;

        let range: String = Input::with_theme(&self.theme)
            .with_prompt("📅 Year range (e.g. 2015..2020)")
            .default(current.years.to_string())
            .validate_with(validate_year_range)
            .interact_text()?;

        Ok(current
            .clone()
            .with_industries(industries)
            .with_regions(regions)
            .with_years(YearRange::parse(&range)?))
    }

    fn pick(
        &self,
        prompt: &str,
        options: &[String],
        chosen: &BTreeSet<String>,
    ) -> Result<Vec<String>> {
        if options.is_empty() {
            return Ok(Vec::new());
        }

        println!("{}", colorize(prompt, Colors::BRIGHT_WHITE));
        let indices = MultiSelect::with_theme(&self.theme)
            .items(options)
            .defaults(&default_checks(options, chosen))
            .interact()?;

        Ok(selected_from_indices(options, &indices))
    }
}
