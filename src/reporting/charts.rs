//! Chart.js configurations and the correlation heatmap
//!
//! Each aggregation maps to one chart: scatter (with an OLS trend line) for
//! record pairs, bar for category means, line for yearly means and an
//! annotated colour table for the correlation matrix.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analysis::aggregate::{GroupMean, YearMean};
use crate::analysis::correlation::CorrelationMatrix;
use crate::analysis::regression::{fit, scatter_points};
use crate::core::types::{CompanyYearRecord, NumericColumn};
use crate::data::View;
use crate::reporting::ReportError;
use crate::reporting::html::escape;

/// Series colours, cycled when there are more groups than entries
const PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

const TREND_COLOR: &str = "#dc2626";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Series {
    Values(Vec<f64>),
    Points(Vec<Point>),
}

impl Series {
    fn is_empty(&self) -> bool {
        match self {
            Series::Values(v) => v.is_empty(),
            Series::Points(p) => p.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Series,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
    pub background_color: String,
    pub border_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u8>,
    pub fill: bool,
}

impl ChartDataset {
    fn new(label: impl Into<String>, data: Series, color: &str) -> Self {
        Self {
            label: label.into(),
            data,
            kind: None,
            background_color: color.to_string(),
            border_color: color.to_string(),
            show_line: None,
            point_radius: None,
            fill: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Title {
    display: bool,
    text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Self {
            display: true,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Axis {
    title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Scales {
    x: Axis,
    y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Plugins {
    title: Title,
    legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Legend {
    display: bool,
    position: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartOptions {
    responsive: bool,
    plugins: Plugins,
    scales: Scales,
}

/// Full Chart.js configuration: `{ type, data, options }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    options: ChartOptions,
}

/// A chart bound to the canvas id it is drawn on
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub id: String,
    pub title: String,
    pub config: ChartConfig,
}

impl Chart {
    fn new(
        id: &str,
        title: &str,
        kind: ChartKind,
        data: ChartData,
        x_label: &str,
        y_label: &str,
    ) -> Self {
        let legend = data.datasets.len() > 1;
        Self {
            id: id.to_string(),
            title: title.to_string(),
            config: ChartConfig {
                kind,
                data,
                options: ChartOptions {
                    responsive: true,
                    plugins: Plugins {
                        title: Title::new(title),
                        legend: Legend {
                            display: legend,
                            position: "bottom",
                        },
                    },
                    scales: Scales {
                        x: Axis {
                            title: Title::new(x_label),
                        },
                        y: Axis {
                            title: Title::new(y_label),
                        },
                    },
                },
            },
        }
    }

    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    /// True when no dataset has any point to draw
    pub fn is_empty(&self) -> bool {
        self.config.data.datasets.iter().all(|d| d.data.is_empty())
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

/// How scatter points are split into coloured series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Industry,
    Region,
    Year,
}

impl GroupBy {
    fn key(&self, record: &CompanyYearRecord) -> String {
        match self {
            GroupBy::Industry => record.industry.clone(),
            GroupBy::Region => record.region.clone(),
            GroupBy::Year => record.year.to_string(),
        }
    }
}

fn to_points(pairs: &[(f64, f64)]) -> Vec<Point> {
    pairs.iter().map(|&(x, y)| Point { x, y }).collect()
}

fn trend_dataset(name: &str, pairs: &[(f64, f64)], color: &str) -> Option<ChartDataset> {
    let line = fit(pairs)?;
    let segment = to_points(&line.segment());
    let mut dataset = ChartDataset::new(
        format!("{name} (R² {:.2})", line.r_squared),
        Series::Points(segment),
        color,
    );
    dataset.kind = Some(ChartKind::Line);
    dataset.show_line = Some(true);
    dataset.point_radius = Some(0);
    Some(dataset)
}

/// Scatter of `y` against `x` with a fitted trend line
pub fn scatter_with_trend(
    id: &str,
    title: &str,
    view: &View<'_>,
    x: NumericColumn,
    y: NumericColumn,
) -> Chart {
    let pairs = scatter_points(view, x, y);
    let mut datasets = vec![ChartDataset::new(
        "Companies",
        Series::Points(to_points(&pairs)),
        PALETTE[0],
    )];
    datasets.extend(trend_dataset("OLS trend", &pairs, TREND_COLOR));

    let data = ChartData {
        labels: Vec::new(),
        datasets,
    };
    Chart::new(id, title, ChartKind::Scatter, data, x.label(), y.label())
}

/// Scatter of `y` against `x` with one coloured series and one OLS trend line per group
pub fn grouped_scatter(
    id: &str,
    title: &str,
    view: &View<'_>,
    x: NumericColumn,
    y: NumericColumn,
    group: GroupBy,
) -> Chart {
    let mut groups: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();
    for record in view.iter() {
        if let (Some(xv), Some(yv)) = (record.get(x), record.get(y)) {
            groups.entry(group.key(record)).or_default().push((xv, yv));
        }
    }

    // Each group is followed by its own trend line in the group colour
    let mut datasets = Vec::with_capacity(groups.len() * 2);
    for (i, (label, pairs)) in groups.into_iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let trend = trend_dataset(&format!("{label} OLS trend"), &pairs, color);
        datasets.push(ChartDataset::new(label, Series::Points(to_points(&pairs)), color));
        datasets.extend(trend);
    }

    let data = ChartData {
        labels: Vec::new(),
        datasets,
    };
    Chart::new(id, title, ChartKind::Scatter, data, x.label(), y.label())
}

/// Bar chart of per-category means, in the order given
pub fn bar_chart(
    id: &str,
    title: &str,
    means: &[GroupMean],
    category: &str,
    metric: NumericColumn,
) -> Chart {
    let data = ChartData {
        labels: means.iter().map(|m| m.label.clone()).collect(),
        datasets: vec![ChartDataset::new(
            format!("Average {}", metric.label()),
            Series::Values(means.iter().map(|m| m.mean).collect()),
            PALETTE[0],
        )],
    };
    Chart::new(id, title, ChartKind::Bar, data, category, metric.label())
}

/// Line chart of yearly means
pub fn line_chart(id: &str, title: &str, means: &[YearMean], metric: NumericColumn) -> Chart {
    let mut dataset = ChartDataset::new(
        format!("Average {}", metric.label()),
        Series::Values(means.iter().map(|m| m.mean).collect()),
        PALETTE[4],
    );
    dataset.point_radius = Some(4);

    let data = ChartData {
        labels: means.iter().map(|m| m.year.to_string()).collect(),
        datasets: vec![dataset],
    };
    Chart::new(id, title, ChartKind::Line, data, "Year", metric.label())
}

/// Coolwarm colour for a coefficient in [-1, 1]
pub fn coolwarm(value: f64) -> String {
    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let t = value.clamp(-1.0, 1.0);
    let (from, to, w) = if t < 0.0 {
        (MID, COOL, -t)
    } else {
        (MID, WARM, t)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * w).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(from.0, to.0),
        mix(from.1, to.1),
        mix(from.2, to.2)
    )
}

/// Annotated, colour-scaled HTML table of a correlation matrix
pub fn heatmap_table(matrix: &CorrelationMatrix) -> String {
    let header: String = matrix
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape(c.label())))
        .collect();

    let rows: String = matrix
        .columns
        .iter()
        .zip(&matrix.values)
        .map(|(column, row)| {
            let cells: String = row
                .iter()
                .map(|value| match value {
                    Some(v) => {
                        let text = if v.abs() > 0.5 { "#ffffff" } else { "#1e293b" };
                        format!(
                            r#"<td style="background-color: {}; color: {}">{:.2}</td>"#,
                            coolwarm(*v),
                            text,
                            v
                        )
                    }
                    None => r#"<td class="na">n/a</td>"#.to_string(),
                })
                .collect();
            format!("<tr><th>{}</th>{}</tr>", escape(column.label()), cells)
        })
        .collect();

    format!(
        r#"<table class="heatmap"><thead><tr><th></th>{header}</tr></thead><tbody>{rows}</tbody></table>"#
    )
}
