use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::analysis::aggregate::{
    GroupMean, SummaryMetrics, YearMean, mean_by_industry, mean_by_region, mean_by_year,
    summary_metrics,
};
use crate::analysis::correlation::{CorrelationMatrix, correlation_matrix};
use crate::analysis::describe::{ColumnSummary, describe};
use crate::core::constants::display;
use crate::core::types::NumericColumn;
use crate::data::{Dataset, FilterSelection};
use crate::reporting::ReportError;
use crate::reporting::charts::{
    Chart, GroupBy, bar_chart, grouped_scatter, heatmap_table, line_chart,
};
use crate::reporting::html::{self, escape};

/// Constants for dashboard layout
mod dashboard_constants {
    pub const TITLE: &str = "ESG & Financial Performance Dashboard";

    /// Tab ids and captions, in display order
    pub const TABS: [(&str, &str); 5] = [
        ("tab-overview", "Overview"),
        ("tab-carbon", "ESG vs Carbon"),
        ("tab-groups", "Industry & Region"),
        ("tab-trends", "Trends"),
        ("tab-correlation", "Correlation"),
    ];

    pub const HEATMAP_TITLE: &str = "Correlation Heatmap";
}

/// Values the three filter controls can take
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub industries: Vec<String>,
    pub regions: Vec<String>,
    pub years: Option<(i32, i32)>,
}

/// Charts drawn on the dashboard tabs
#[derive(Debug, Clone)]
pub struct DashboardCharts {
    pub carbon_vs_esg: Chart,
    pub by_industry: Chart,
    pub by_region: Chart,
    pub esg_trend: Chart,
    pub revenue_vs_esg: Chart,
}

impl DashboardCharts {
    fn all(&self) -> [&Chart; 5] {
        [
            &self.carbon_vs_esg,
            &self.by_industry,
            &self.by_region,
            &self.esg_trend,
            &self.revenue_vs_esg,
        ]
    }
}

/// Data structure containing all information needed for dashboard generation
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub source: String,
    pub total_records: usize,
    pub selection: FilterSelection,
    pub options: FilterOptions,
    pub summary: SummaryMetrics,
    pub describe: Vec<ColumnSummary>,
    pub by_industry: Vec<GroupMean>,
    pub by_region: Vec<GroupMean>,
    pub by_year: Vec<YearMean>,
    pub correlation: CorrelationMatrix,
    #[serde(skip)]
    pub charts: DashboardCharts,
    pub timestamp: String,
}

impl DashboardData {
    /// Filter the dataset with `selection` and aggregate the resulting view
    pub fn build(
        dataset: &Dataset,
        selection: &FilterSelection,
        timestamp: impl Into<String>,
    ) -> Self {
        let view = selection.apply(dataset);
        let esg = NumericColumn::EsgScore;

        let by_industry = mean_by_industry(&view, esg);
        let by_region = mean_by_region(&view, esg);
        let by_year = mean_by_year(&view, esg);

        let charts = DashboardCharts {
            carbon_vs_esg: grouped_scatter(
                "carbonVsEsg",
                "Carbon Emissions vs ESG Score",
                &view,
                NumericColumn::CarbonEmissions,
                esg,
                GroupBy::Industry,
            ),
            by_industry: bar_chart(
                "industryEsg",
                "Industry-wise ESG Score",
                &by_industry,
                "Industry",
                esg,
            ),
            by_region: bar_chart(
                "regionEsg",
                "Region-wise ESG Score",
                &by_region,
                "Region",
                esg,
            ),
            esg_trend: line_chart("esgTrend", "Trend of ESG Score Over Years", &by_year, esg),
            revenue_vs_esg: grouped_scatter(
                "revenueVsEsg",
                "Revenue vs ESG Over Time",
                &view,
                NumericColumn::Revenue,
                esg,
                GroupBy::Year,
            ),
        };

        Self {
            source: dataset.source().display().to_string(),
            total_records: dataset.len(),
            selection: selection.clone(),
            options: FilterOptions {
                industries: dataset.industries(),
                regions: dataset.regions(),
                years: dataset.year_bounds(),
            },
            summary: summary_metrics(&view),
            describe: describe(&view),
            by_industry,
            by_region,
            by_year,
            correlation: correlation_matrix(&view, &NumericColumn::ALL),
            charts,
            timestamp: timestamp.into(),
        }
    }

    /// Charts plus the heatmap
    pub fn chart_count(&self) -> usize {
        self.charts.all().len() + 1
    }
}

/// HTML dashboard generator for a filtered view
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Generate and write an HTML dashboard to the specified path
    pub fn generate_dashboard<P: AsRef<Path>>(
        data: &DashboardData,
        output_path: P,
    ) -> Result<(), ReportError> {
        let html_content = Self::generate_html_content(data)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    /// Generate the complete HTML document content
    pub fn generate_html_content(data: &DashboardData) -> Result<String, ReportError> {
        let script = html::charts_script(&data.charts.all())?;
        Ok(html::page(
            dashboard_constants::TITLE,
            &Self::generate_body_content(data),
            &script,
        ))
    }

    fn generate_body_content(data: &DashboardData) -> String {
        let header = html::header_section(
            dashboard_constants::TITLE,
            &format!(
                "{} of {} records selected from {}",
                data.summary.records, data.total_records, data.source
            ),
            &data.timestamp,
        );

        format!(
            r#"
            <div class="container">
                {}
                <div class="layout">
                    {}
                    <main>
                        {}
                        {}
                    </main>
                </div>
            </div>
            "#,
            header,
            Self::generate_sidebar(data),
            Self::generate_tab_bar(),
            Self::generate_tab_panels(data)
        )
    }

    /// Current value and options of each filter control
    fn generate_sidebar(data: &DashboardData) -> String {
        let list = |options: &[String], chosen: &dyn Fn(&str) -> bool| -> String {
            options
                .iter()
                .map(|option| {
                    if chosen(option) {
                        format!("<li>☑ {}</li>", escape(option))
                    } else {
                        format!(r#"<li class="off">☐ {}</li>"#, escape(option))
                    }
                })
                .collect()
        };

        let selection = &data.selection;
        let industries = list(&data.options.industries, &|o| {
            selection.industries.contains(o)
        });
        let regions = list(&data.options.regions, &|o| selection.regions.contains(o));
        let available = data
            .options
            .years
            .map(|(start, end)| format!("{start}-{end}"))
            .unwrap_or_else(|| display::NO_DATA.to_string());

        format!(
            r#"
                    <aside class="sidebar">
                        <h2>Filters</h2>
                        <h3>Industry ({} of {})</h3>
                        <ul>{}</ul>
                        <h3>Region ({} of {})</h3>
                        <ul>{}</ul>
                        <h3>Year Range</h3>
                        <p>{} <span class="note">(available {})</span></p>
                    </aside>
            "#,
            selection.industries.len(),
            data.options.industries.len(),
            industries,
            selection.regions.len(),
            data.options.regions.len(),
            regions,
            selection.years,
            available
        )
    }

    fn generate_tab_bar() -> String {
        let buttons: String = dashboard_constants::TABS
            .iter()
            .enumerate()
            .map(|(i, (id, caption))| {
                let active = if i == 0 { " active" } else { "" };
                format!(
                    r#"<button class="tab-button{active}" data-tab="{id}">{}</button>"#,
                    escape(caption)
                )
            })
            .collect();
        format!(r#"<nav class="tabs">{buttons}</nav>"#)
    }

    fn generate_tab_panels(data: &DashboardData) -> String {
        let charts = &data.charts;
        let contents = [
            Self::generate_overview(data),
            html::chart_panel(&charts.carbon_vs_esg),
            format!(
                "{}{}",
                html::chart_panel(&charts.by_industry),
                html::chart_panel(&charts.by_region)
            ),
            format!(
                "{}{}",
                html::chart_panel(&charts.esg_trend),
                html::chart_panel(&charts.revenue_vs_esg)
            ),
            Self::generate_correlation(data),
        ];

        dashboard_constants::TABS
            .iter()
            .zip(contents)
            .enumerate()
            .map(|(i, ((id, _), content))| {
                let active = if i == 0 { " active" } else { "" };
                format!(r#"<section class="tab-panel{active}" id="{id}">{content}</section>"#)
            })
            .collect()
    }

    fn generate_overview(data: &DashboardData) -> String {
        let format_metric = |value: Option<f64>| {
            value.map_or_else(|| display::NO_DATA.to_string(), |v| format!("{v:.2}"))
        };

        let cards = format!(
            r#"
            <div class="stats-grid">
                {}
                {}
                {}
                {}
            </div>
            "#,
            html::stat_card("🏢", &data.summary.records.to_string(), "Records", "info"),
            html::stat_card(
                "🌱",
                &format_metric(data.summary.mean_esg),
                "Average ESG Score",
                "success"
            ),
            html::stat_card(
                "💰",
                &format_metric(data.summary.mean_revenue),
                "Average Revenue",
                "info"
            ),
            html::stat_card(
                "🏭",
                &format_metric(data.summary.mean_carbon),
                "Average Carbon Emissions",
                "warning"
            ),
        );

        if data.summary.is_empty() {
            return format!("{cards}{}", html::empty_panel("Summary Statistics"));
        }
        format!(
            "{cards}{}",
            html::table_panel(
                "Summary Statistics",
                &Self::generate_describe_table(&data.describe)
            )
        )
    }

    fn generate_describe_table(summaries: &[ColumnSummary]) -> String {
        let cell = |value: Option<f64>| {
            value.map_or_else(
                || r#"<td class="na">n/a</td>"#.to_string(),
                |v| format!("<td>{v:.2}</td>"),
            )
        };

        let rows: String = summaries
            .iter()
            .map(|s| {
                format!(
                    "<tr><th>{}</th><td>{}</td>{}{}{}{}{}{}{}</tr>",
                    escape(s.column.label()),
                    s.count,
                    cell(s.mean),
                    cell(s.std),
                    cell(s.min),
                    cell(s.q25),
                    cell(s.median),
                    cell(s.q75),
                    cell(s.max)
                )
            })
            .collect();

        format!(
            "<table><thead><tr><th></th><th>count</th><th>mean</th><th>std</th><th>min</th>\
             <th>25%</th><th>50%</th><th>75%</th><th>max</th></tr></thead><tbody>{rows}</tbody></table>"
        )
    }

    fn generate_correlation(data: &DashboardData) -> String {
        if data.correlation.is_empty() {
            return html::empty_panel(dashboard_constants::HEATMAP_TITLE);
        }
        html::table_panel(
            dashboard_constants::HEATMAP_TITLE,
            &heatmap_table(&data.correlation),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CompanyYearRecord;
    use crate::data::YearRange;
    use crate::reporting::charts::ChartKind;
    use crate::reporting::html::page_constants;
    use std::error::Error;
    use tempfile::NamedTempFile;

    fn create_test_dataset() -> Dataset {
        Dataset::from_records(vec![
            CompanyYearRecord::new("1", "A", "Energy", "Europe", 2020)
                .with(NumericColumn::EsgScore, 40.0)
                .with(NumericColumn::CarbonEmissions, 100.0)
                .with(NumericColumn::Revenue, 300.0),
            CompanyYearRecord::new("2", "B", "Retail", "Asia", 2020)
                .with(NumericColumn::EsgScore, 70.0)
                .with(NumericColumn::CarbonEmissions, 10.0)
                .with(NumericColumn::Revenue, 900.0),
            CompanyYearRecord::new("3", "C", "Retail", "Asia", 2021)
                .with(NumericColumn::EsgScore, 64.0)
                .with(NumericColumn::CarbonEmissions, 25.0)
                .with(NumericColumn::Revenue, 800.0),
        ])
    }

    #[test]
    fn test_dashboard_data_build() {
        let dataset = create_test_dataset();
        let selection = FilterSelection::all(&dataset);
        let data = DashboardData::build(&dataset, &selection, "2026-01-01 00:00:00");

        assert_eq!(data.total_records, 3);
        assert_eq!(data.summary.records, 3);
        assert_eq!(data.summary.mean_esg, Some(58.0));
        assert_eq!(data.by_industry[0].label, "Retail");
        assert_eq!(data.by_year.len(), 2);
        assert_eq!(data.options.years, Some((2020, 2021)));
        assert_eq!(data.chart_count(), 6);
    }

    #[test]
    fn test_dashboard_scatters_carry_trend_lines() {
        let dataset = create_test_dataset();
        let selection = FilterSelection::all(&dataset);
        let data = DashboardData::build(&dataset, &selection, "2026-01-01 00:00:00");

        let trends = |chart: &Chart| -> Vec<String> {
            chart
                .config
                .data
                .datasets
                .iter()
                .filter(|d| d.kind == Some(ChartKind::Line))
                .map(|d| d.label.clone())
                .collect()
        };

        let carbon = trends(&data.charts.carbon_vs_esg);
        assert_eq!(carbon.len(), 1);
        assert!(carbon[0].starts_with("Retail OLS trend"));

        let revenue = trends(&data.charts.revenue_vs_esg);
        assert_eq!(revenue.len(), 1);
        assert!(revenue[0].starts_with("2020 OLS trend"));
    }

    #[test]
    fn test_generate_html_content() -> Result<(), ReportError> {
        let dataset = create_test_dataset();
        let selection = FilterSelection::all(&dataset);
        let data = DashboardData::build(&dataset, &selection, "2026-01-01 00:00:00");
        let html = HtmlDashboard::generate_html_content(&data)?;

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains(&escape(dashboard_constants::TITLE)));
        assert!(html.contains(page_constants::CHART_JS_CDN));
        assert!(html.contains("2026-01-01 00:00:00"));
        for (id, caption) in dashboard_constants::TABS {
            assert!(html.contains(id));
            assert!(html.contains(&escape(caption)));
        }
        assert!(html.contains("Carbon Emissions vs ESG Score"));
        assert!(html.contains("Revenue vs ESG Over Time"));
        assert!(html.contains("Average Carbon Emissions"));
        assert!(html.contains("58.00"));
        assert!(!html.contains(page_constants::EMPTY_SELECTION));
        Ok(())
    }

    #[test]
    fn test_sidebar_marks_unselected_options() -> Result<(), ReportError> {
        let dataset = create_test_dataset();
        let selection = FilterSelection::all(&dataset).with_industries(["Retail"]);
        let data = DashboardData::build(&dataset, &selection, "now");
        let html = HtmlDashboard::generate_html_content(&data)?;

        assert!(html.contains("☑ Retail"));
        assert!(html.contains(r#"<li class="off">☐ Energy</li>"#));
        assert!(html.contains("Industry (1 of 2)"));
        assert_eq!(data.summary.records, 2);
        Ok(())
    }

    #[test]
    fn test_empty_selection_renders_placeholders() -> Result<(), ReportError> {
        let dataset = create_test_dataset();
        let selection = FilterSelection::all(&dataset).with_industries(Vec::<String>::new());
        let data = DashboardData::build(&dataset, &selection, "now");
        assert!(data.summary.is_empty());
        assert!(data.by_industry.is_empty());

        let html = HtmlDashboard::generate_html_content(&data)?;
        assert!(html.contains(page_constants::EMPTY_SELECTION));
        assert!(html.contains(display::NO_DATA));
        assert!(html.contains("window.esgCharts = [];"));
        Ok(())
    }

    #[test]
    fn test_year_range_outside_data() {
        let dataset = create_test_dataset();
        let selection = FilterSelection::all(&dataset).with_years(YearRange::new(1990, 1995));
        let data = DashboardData::build(&dataset, &selection, "now");
        assert!(data.summary.is_empty());
        assert!(data.correlation.is_empty());
    }

    #[test]
    fn test_dashboard_data_serializes_without_charts() -> Result<(), Box<dyn Error>> {
        let dataset = create_test_dataset();
        let data = DashboardData::build(&dataset, &FilterSelection::all(&dataset), "now");
        let json = serde_json::to_value(&data)?;
        assert!(json.get("charts").is_none());
        assert_eq!(json["summary"]["records"], 3);
        assert_eq!(json["by_industry"][0]["label"], "Retail");
        Ok(())
    }

    #[test]
    fn test_generate_dashboard_file_creation() -> Result<(), Box<dyn Error>> {
        let temp_file = NamedTempFile::new()?;
        let dataset = create_test_dataset();
        let data = DashboardData::build(&dataset, &FilterSelection::all(&dataset), "now");

        HtmlDashboard::generate_dashboard(&data, temp_file.path())?;

        let content = std::fs::read_to_string(temp_file.path())?;
        assert!(content.contains("<!DOCTYPE html>"));
        assert!(content.contains("carbonVsEsg"));
        Ok(())
    }

    #[test]
    fn test_generate_dashboard_invalid_path() {
        let dataset = create_test_dataset();
        let data = DashboardData::build(&dataset, &FilterSelection::all(&dataset), "now");
        let result =
            HtmlDashboard::generate_dashboard(&data, "/invalid/path/that/does/not/exist.html");

        assert!(result.is_err());
        match result {
            Err(ReportError::FileWrite(_)) => {}
            _ => panic!("Expected FileWrite error"),
        }
    }
}
