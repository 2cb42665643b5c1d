//! Batch HTML report over the full dataset

use std::fs;
use std::path::Path;

use crate::analysis::aggregate::{
    SummaryMetrics, mean_by_industry, mean_by_region, mean_by_year, summary_metrics,
};
use crate::analysis::correlation::{CorrelationMatrix, correlation_matrix};
use crate::core::constants::{columns, display};
use crate::core::types::{CompanyYearRecord, NumericColumn};
use crate::data::{Dataset, LoadStats};
use crate::reporting::ReportError;
use crate::reporting::charts::{Chart, bar_chart, heatmap_table, line_chart, scatter_with_trend};
use crate::reporting::html::{self, escape};
use crate::reporting::insights::{ILLUSTRATIVE_NOTE, INSIGHTS, RECOMMENDATIONS};

pub const REPORT_TITLE: &str = "ESG & Financial Performance Report";
pub const HEATMAP_TITLE: &str = "Correlation Heatmap (ESG & Financials)";

/// Everything the batch report shows, computed once from the dataset
#[derive(Debug, Clone)]
pub struct ReportData {
    pub source: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub stats: LoadStats,
    pub preview: Vec<Vec<String>>,
    pub summary: SummaryMetrics,
    pub charts: Vec<Chart>,
    pub correlation: CorrelationMatrix,
    pub timestamp: String,
}

impl ReportData {
    pub fn from_dataset(dataset: &Dataset, head_rows: usize, timestamp: impl Into<String>) -> Self {
        let view = dataset.view();
        let esg = NumericColumn::EsgScore;

        let charts = vec![
            scatter_with_trend(
                "esgVsCarbon",
                "ESG Score vs Carbon Emissions",
                &view,
                NumericColumn::CarbonEmissions,
                esg,
            ),
            scatter_with_trend(
                "esgVsRevenue",
                "ESG Score vs Revenue",
                &view,
                NumericColumn::Revenue,
                esg,
            ),
            bar_chart(
                "esgByIndustry",
                "Average ESG Score by Industry",
                &mean_by_industry(&view, esg),
                "Industry",
                esg,
            ),
            bar_chart(
                "esgByRegion",
                "Average ESG Score by Region",
                &mean_by_region(&view, esg),
                "Region",
                esg,
            ),
            line_chart(
                "esgTrend",
                "ESG Score Trend Over Time",
                &mean_by_year(&view, esg),
                esg,
            ),
        ];

        Self {
            source: dataset.source().display().to_string(),
            rows: dataset.len(),
            columns: dataset.columns().to_vec(),
            stats: dataset.stats(),
            preview: preview_rows(dataset, head_rows),
            summary: summary_metrics(&view),
            charts,
            correlation: correlation_matrix(&view, &NumericColumn::ALL),
            timestamp: timestamp.into(),
        }
    }

    /// Rendered charts including the heatmap
    pub fn chart_count(&self) -> usize {
        self.charts.len() + 1
    }
}

/// Display cells of one record in canonical column order
pub fn record_cells(record: &CompanyYearRecord) -> Vec<String> {
    let mut cells = vec![
        record.company_id.clone(),
        record.company_name.clone(),
        record.industry.clone(),
        record.region.clone(),
        record.year.to_string(),
    ];
    cells.extend(
        NumericColumn::ALL
            .iter()
            .map(|c| record.get(*c).map(|v| v.to_string()).unwrap_or_default()),
    );
    cells
}

/// The first `n` records as display cells
pub fn preview_rows(dataset: &Dataset, n: usize) -> Vec<Vec<String>> {
    dataset.records().iter().take(n).map(record_cells).collect()
}

/// HTML report generator for the full dataset
pub struct HtmlReport;

impl HtmlReport {
    /// Generate and write the report to the specified path
    pub fn generate_report<P: AsRef<Path>>(
        data: &ReportData,
        output_path: P,
    ) -> Result<(), ReportError> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    pub fn generate_html_content(data: &ReportData) -> Result<String, ReportError> {
        let charts: Vec<&Chart> = data.charts.iter().collect();
        let script = html::charts_script(&charts)?;
        Ok(html::page(REPORT_TITLE, &Self::generate_body_content(data), &script))
    }

    fn generate_body_content(data: &ReportData) -> String {
        let header = html::header_section(
            REPORT_TITLE,
            &format!("Dataset: {}", data.source),
            &data.timestamp,
        );
        let charts: String = data.charts.iter().map(html::chart_panel).collect();
        let heatmap = if data.correlation.is_empty() {
            html::empty_panel(HEATMAP_TITLE)
        } else {
            html::table_panel(HEATMAP_TITLE, &heatmap_table(&data.correlation))
        };

        format!(
            r#"
            <div class="container">
                {}
                {}
                {}
                {}
                {}
                {}
                {}
            </div>
            "#,
            header,
            Self::generate_shape_section(data),
            Self::generate_preview_section(data),
            charts,
            heatmap,
            html::list_section(
                &format!("{} Key Insights", display::INSIGHT_EMOJI),
                Some(ILLUSTRATIVE_NOTE),
                &INSIGHTS,
                "insights"
            ),
            html::list_section(
                &format!("{} Policy Recommendations", display::POLICY_EMOJI),
                None,
                &RECOMMENDATIONS,
                "recommendations"
            ),
        )
    }

    fn generate_shape_section(data: &ReportData) -> String {
        let format_metric = |value: Option<f64>| {
            value.map_or_else(|| display::NO_DATA.to_string(), |v| format!("{v:.2}"))
        };

        format!(
            r#"
            <div class="stats-grid">
                {}
                {}
                {}
                {}
            </div>
            "#,
            html::stat_card("📄", &data.rows.to_string(), "Rows", "info"),
            html::stat_card("🧾", &data.columns.len().to_string(), "Columns", "info"),
            html::stat_card(
                "🌱",
                &format_metric(data.summary.mean_esg),
                "Average ESG Score",
                "success"
            ),
            html::stat_card(
                "🏭",
                &format_metric(data.summary.mean_carbon),
                "Average Carbon Emissions",
                "warning"
            ),
        )
    }

    fn generate_preview_section(data: &ReportData) -> String {
        if data.preview.is_empty() {
            return html::empty_panel("Dataset Preview");
        }
        let header: String = columns::REQUIRED
            .iter()
            .map(|c| format!("<th>{}</th>", escape(c)))
            .collect();
        let rows: String = data
            .preview
            .iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape(cell)))
                    .collect();
                format!("<tr>{cells}</tr>")
            })
            .collect();

        html::table_panel(
            "Dataset Preview",
            &format!("<table><thead><tr>{header}</tr></thead><tbody>{rows}</tbody></table>"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::html::page_constants;
    use tempfile::NamedTempFile;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            CompanyYearRecord::new("1", "Acme", "Energy", "Europe", 2020)
                .with(NumericColumn::EsgScore, 40.0)
                .with(NumericColumn::CarbonEmissions, 100.0)
                .with(NumericColumn::Revenue, 500.0),
            CompanyYearRecord::new("2", "Shop & Co", "Retail", "Asia", 2021)
                .with(NumericColumn::EsgScore, 70.0)
                .with(NumericColumn::CarbonEmissions, 10.0)
                .with(NumericColumn::Revenue, 900.0),
        ])
    }

    #[test]
    fn test_report_data_has_six_charts() {
        let data = ReportData::from_dataset(&sample(), 5, "2026-01-01 00:00:00");
        assert_eq!(data.charts.len(), 5);
        assert_eq!(data.chart_count(), 6);
        assert_eq!(data.rows, 2);
        assert_eq!(data.columns.len(), 16);
        assert_eq!(data.preview.len(), 2);
        assert_eq!(data.summary.mean_esg, Some(55.0));
    }

    #[test]
    fn test_record_cells_order() {
        let record = CompanyYearRecord::new("7", "Acme", "Energy", "Europe", 2020)
            .with(NumericColumn::Revenue, 12.5);
        let cells = record_cells(&record);
        assert_eq!(cells.len(), 16);
        assert_eq!(&cells[..6], &["7", "Acme", "Energy", "Europe", "2020", "12.5"]);
        assert_eq!(cells[6], "");
    }

    #[test]
    fn test_html_content_sections() -> Result<(), ReportError> {
        let data = ReportData::from_dataset(&sample(), 1, "now");
        let html = HtmlReport::generate_html_content(&data)?;

        assert!(html.contains(&escape(REPORT_TITLE)));
        assert!(html.contains("ESG Score vs Carbon Emissions"));
        assert!(html.contains("Average ESG Score by Region"));
        assert!(html.contains(&escape(HEATMAP_TITLE)));
        assert!(!html.contains("Shop &amp; Co"));
        assert!(html.contains("Acme"));
        assert!(html.contains(ILLUSTRATIVE_NOTE));
        for recommendation in RECOMMENDATIONS {
            assert!(html.contains(&escape(recommendation)));
        }
        Ok(())
    }

    #[test]
    fn test_empty_dataset_report() -> Result<(), ReportError> {
        let data = ReportData::from_dataset(&Dataset::from_records(vec![]), 5, "now");
        let html = HtmlReport::generate_html_content(&data)?;
        assert!(html.contains(page_constants::EMPTY_SELECTION));
        assert!(html.contains("window.esgCharts = [];"));
        Ok(())
    }

    #[test]
    fn test_generate_report_writes_file() -> Result<(), Box<dyn std::error::Error>> {
        let temp_file = NamedTempFile::new()?;
        let data = ReportData::from_dataset(&sample(), 5, "now");
        HtmlReport::generate_report(&data, temp_file.path())?;

        let content = std::fs::read_to_string(temp_file.path())?;
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("esgVsRevenue"));
        Ok(())
    }
}
