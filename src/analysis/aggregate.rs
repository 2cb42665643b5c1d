//! Group means and summary metrics
//!
//! Missing values are skipped. Groups that end up with no valid value for the
//! metric are left out of the result.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::cmp::Ordering;
use std::hash::Hash;

use crate::core::constants::defaults;
use crate::core::types::{CompanyYearRecord, NumericColumn};
use crate::data::View;

/// Mean of a metric for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub label: String,
    pub mean: f64,
    pub count: usize,
}

/// Mean of a metric for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMean {
    pub year: i32,
    pub mean: f64,
    pub count: usize,
}

/// Headline numbers shown as metric cards
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub records: usize,
    pub mean_esg: Option<f64>,
    pub mean_revenue: Option<f64>,
    pub mean_carbon: Option<f64>,
}

impl SummaryMetrics {
    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Mean of a metric over the view, skipping missing values
pub fn mean(view: &View<'_>, metric: NumericColumn) -> Option<f64> {
    let mut acc = Accumulator::default();
    for value in view.iter().filter_map(|r| r.get(metric)) {
        acc.push(value);
    }
    acc.mean()
}

fn group_means<K, F>(view: &View<'_>, metric: NumericColumn, key: F) -> Vec<(K, f64, usize)>
where
    K: Eq + Hash,
    F: Fn(&CompanyYearRecord) -> K,
{
    let mut groups: FxHashMap<K, Accumulator> = FxHashMap::default();
    for record in view.iter() {
        if let Some(value) = record.get(metric) {
            groups.entry(key(record)).or_default().push(value);
        }
    }

    groups
        .into_iter()
        .filter_map(|(k, acc)| acc.mean().map(|m| (k, m, acc.count)))
        .collect()
}

fn sort_descending(mut means: Vec<GroupMean>) -> Vec<GroupMean> {
    means.sort_by(|a, b| {
        b.mean
            .partial_cmp(&a.mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    means
}

fn labelled(view: &View<'_>, metric: NumericColumn, field: fn(&CompanyYearRecord) -> &str) -> Vec<GroupMean> {
    let means = group_means(view, metric, |r| field(r).to_string())
        .into_iter()
        .map(|(label, mean, count)| GroupMean { label, mean, count })
        .collect();
    sort_descending(means)
}

/// Mean of `metric` per industry, highest first
pub fn mean_by_industry(view: &View<'_>, metric: NumericColumn) -> Vec<GroupMean> {
    labelled(view, metric, |r| r.industry.as_str())
}

/// Mean of `metric` per region, highest first
pub fn mean_by_region(view: &View<'_>, metric: NumericColumn) -> Vec<GroupMean> {
    labelled(view, metric, |r| r.region.as_str())
}

/// Mean of `metric` per year, oldest first
pub fn mean_by_year(view: &View<'_>, metric: NumericColumn) -> Vec<YearMean> {
    let mut means: Vec<YearMean> = group_means(view, metric, |r| r.year)
        .into_iter()
        .map(|(year, mean, count)| YearMean { year, mean, count })
        .collect();
    means.sort_by_key(|m| m.year);
    means
}

/// Mean ESG score, revenue and carbon emissions, rounded to two decimals
pub fn summary_metrics(view: &View<'_>) -> SummaryMetrics {
    let rounded = |metric| mean(view, metric).map(|m| round_to(m, defaults::SUMMARY_DECIMALS));
    SummaryMetrics {
        records: view.len(),
        mean_esg: rounded(NumericColumn::EsgScore),
        mean_revenue: rounded(NumericColumn::Revenue),
        mean_carbon: rounded(NumericColumn::CarbonEmissions),
    }
}
