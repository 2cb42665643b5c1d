//! Output formatting and display logic for esgdash

use serde_json::json;

use crate::core::constants::{columns, display, output_formats};
use crate::reporting::insights::{ILLUSTRATIVE_NOTE, INSIGHTS, RECOMMENDATIONS};
use crate::reporting::{DashboardData, ReportData};
use crate::ui::color::{Colors, colorize, heading};

fn format_metric(value: Option<f64>) -> String {
    value.map_or_else(|| display::NO_DATA.to_string(), |v| format!("{v:.2}"))
}

/// Fixed-width text table
pub fn format_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(header.to_vec())];
    out.extend(
        rows.iter()
            .map(|row| line(row.iter().map(String::as_str).collect())),
    );
    out.join("\n")
}

/// Render the report summary in the requested format
pub fn render_report(data: &ReportData, output_format: &str, output_path: &str) -> String {
    match output_format {
        output_formats::JSON => render_report_json(data, output_path),
        output_formats::MINIMAL => render_report_minimal(data, output_path),
        _ => render_report_text(data, output_path),
    }
}

fn render_report_text(data: &ReportData, output_path: &str) -> String {
    let mut out = Vec::new();

    out.push(format!(
        "{} {}",
        display::FILE_EMOJI,
        heading("Dataset", Colors::BRIGHT_CYAN)
    ));
    out.push(format!("Source: {}", data.source));
    out.push(format!("Shape: ({}, {})", data.rows, data.columns.len()));
    out.push(format!("Columns: {}", data.columns.join(", ")));
    if data.stats.duplicate_rows > 0 || data.stats.invalid_years > 0 {
        out.push(colorize(
            &format!(
                "Dropped {} duplicate row(s) and {} row(s) with an invalid year",
                data.stats.duplicate_rows, data.stats.invalid_years
            ),
            Colors::YELLOW,
        ));
    }
    out.push(String::new());

    out.push(format!("First {} row(s):", data.preview.len()));
    out.push(format_table(&columns::REQUIRED, &data.preview));
    out.push(String::new());

    out.push(format!(
        "{} {}",
        display::CHART_EMOJI,
        heading("Summary", Colors::BRIGHT_CYAN)
    ));
    out.push(format!(
        "Average ESG Score: {}",
        format_metric(data.summary.mean_esg)
    ));
    out.push(format!(
        "Average Revenue: {}",
        format_metric(data.summary.mean_revenue)
    ));
    out.push(format!(
        "Average Carbon Emissions: {}",
        format_metric(data.summary.mean_carbon)
    ));
    out.push(String::new());

    out.push(format!(
        "{} {}",
        display::INSIGHT_EMOJI,
        heading("Key Insights", Colors::BRIGHT_YELLOW)
    ));
    out.push(colorize(&format!("({ILLUSTRATIVE_NOTE})"), Colors::DIM));
    out.extend(INSIGHTS.iter().map(|i| format!("  - {i}")));
    out.push(String::new());

    out.push(format!(
        "{} {}",
        display::POLICY_EMOJI,
        heading("Policy Recommendations", Colors::BRIGHT_GREEN)
    ));
    out.extend(RECOMMENDATIONS.iter().map(|r| format!("  - {r}")));
    out.push(String::new());

    out.push(format!(
        "{} Report with {} charts written to {}",
        colorize(display::SUCCESS_EMOJI, Colors::BRIGHT_GREEN),
        data.chart_count(),
        colorize(output_path, Colors::CYAN)
    ));
    out.join("\n")
}

fn render_report_minimal(data: &ReportData, output_path: &str) -> String {
    let mut out = vec![
        format!("shape {} {}", data.rows, data.columns.len()),
        format!("columns {}", data.columns.join(",")),
    ];
    out.extend(data.preview.iter().map(|row| row.join(",")));
    out.push(format!("mean_esg {}", format_metric(data.summary.mean_esg)));
    out.push(format!(
        "mean_revenue {}",
        format_metric(data.summary.mean_revenue)
    ));
    out.push(format!(
        "mean_carbon {}",
        format_metric(data.summary.mean_carbon)
    ));
    out.extend(INSIGHTS.iter().map(|i| format!("insight {i}")));
    out.extend(RECOMMENDATIONS.iter().map(|r| format!("recommendation {r}")));
    out.push(format!("output {output_path}"));
    out.join("\n")
}

fn render_report_json(data: &ReportData, output_path: &str) -> String {
    let document = json!({
        "source": data.source,
        "shape": { "rows": data.rows, "columns": data.columns.len() },
        "columns": data.columns,
        "head": data.preview,
        "load_stats": data.stats,
        "summary": data.summary,
        "correlation": data.correlation,
        "insights": {
            "illustrative": true,
            "items": INSIGHTS,
        },
        "recommendations": RECOMMENDATIONS,
        "output": output_path,
    });
    serde_json::to_string_pretty(&document).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Render the dashboard summary in the requested format
pub fn render_dashboard(data: &DashboardData, output_format: &str, output_path: &str) -> String {
    match output_format {
        output_formats::JSON => render_dashboard_json(data, output_path),
        output_formats::MINIMAL => render_dashboard_minimal(data, output_path),
        _ => render_dashboard_text(data, output_path),
    }
}

fn render_dashboard_text(data: &DashboardData, output_path: &str) -> String {
    let mut out = vec![
        format!(
            "{} {}",
            display::CHART_EMOJI,
            heading("ESG & Financial Performance Dashboard", Colors::BRIGHT_CYAN)
        ),
        format!("Selection: {}", data.selection),
        format!(
            "Records: {} of {}",
            data.summary.records, data.total_records
        ),
    ];

    if data.summary.is_empty() {
        out.push(colorize(
            &format!(
                "{} No data for the current selection",
                display::WARNING_EMOJI
            ),
            Colors::YELLOW,
        ));
    } else {
        out.push(format!(
            "Average ESG Score: {}",
            format_metric(data.summary.mean_esg)
        ));
        out.push(format!(
            "Average Revenue: {}",
            format_metric(data.summary.mean_revenue)
        ));
        out.push(format!(
            "Average Carbon Emissions: {}",
            format_metric(data.summary.mean_carbon)
        ));
        if let Some(top) = data.by_industry.first() {
            out.push(format!(
                "Top industry by ESG: {} ({:.2})",
                top.label, top.mean
            ));
        }
        if let Some(top) = data.by_region.first() {
            out.push(format!("Top region by ESG: {} ({:.2})", top.label, top.mean));
        }
    }

    out.push(format!(
        "{} Dashboard written to {}",
        colorize(display::SUCCESS_EMOJI, Colors::BRIGHT_GREEN),
        colorize(output_path, Colors::CYAN)
    ));
    out.join("\n")
}

fn render_dashboard_minimal(data: &DashboardData, output_path: &str) -> String {
    [
        format!("records {}", data.summary.records),
        format!("mean_esg {}", format_metric(data.summary.mean_esg)),
        format!("mean_revenue {}", format_metric(data.summary.mean_revenue)),
        format!("mean_carbon {}", format_metric(data.summary.mean_carbon)),
        format!("output {output_path}"),
    ]
    .join("\n")
}

fn render_dashboard_json(data: &DashboardData, output_path: &str) -> String {
    let document = json!({
        "dashboard": data,
        "output": output_path,
    });
    serde_json::to_string_pretty(&document).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Print the report summary unless quiet
pub fn display_report(data: &ReportData, output_format: &str, quiet: bool, output_path: &str) {
    if quiet && output_format != output_formats::JSON {
        return;
    }
    println!("{}", render_report(data, output_format, output_path));
}

/// Print the dashboard summary unless quiet
pub fn display_dashboard(
    data: &DashboardData,
    output_format: &str,
    quiet: bool,
    output_path: &str,
) {
    if quiet && output_format != output_formats::JSON {
        return;
    }
    println!("{}", render_dashboard(data, output_format, output_path));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CompanyYearRecord, NumericColumn};
    use crate::data::{Dataset, FilterSelection};

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            CompanyYearRecord::new("1", "A", "Energy", "Europe", 2020)
                .with(NumericColumn::EsgScore, 40.0)
                .with(NumericColumn::CarbonEmissions, 100.0),
            CompanyYearRecord::new("2", "B", "Retail", "Asia", 2020)
                .with(NumericColumn::EsgScore, 70.0)
                .with(NumericColumn::CarbonEmissions, 10.0),
        ])
    }

    #[test]
    fn test_format_table_alignment() {
        let table = format_table(
            &["id", "name"],
            &[
                vec!["1".to_string(), "Acme".to_string()],
                vec!["22".to_string(), "B".to_string()],
            ],
        );
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "id  name");
        assert_eq!(lines[1], "1   Acme");
        assert_eq!(lines[2], "22  B");
    }

    #[test]
    fn test_render_report_text() {
        let data = ReportData::from_dataset(&sample(), 5, "now");
        let text = render_report(&data, output_formats::TEXT, "esg_report.html");

        assert!(text.contains("Shape: (2, 16)"));
        assert!(text.contains("Average ESG Score: 55.00"));
        assert!(text.contains("Average Revenue: No data"));
        assert!(text.contains(ILLUSTRATIVE_NOTE));
        for insight in INSIGHTS {
            assert!(text.contains(insight));
        }
        for recommendation in RECOMMENDATIONS {
            assert!(text.contains(recommendation));
        }
        assert!(text.contains("esg_report.html"));
    }

    #[test]
    fn test_render_report_json() -> Result<(), serde_json::Error> {
        let data = ReportData::from_dataset(&sample(), 1, "now");
        let text = render_report(&data, output_formats::JSON, "r.html");
        let value: serde_json::Value = serde_json::from_str(&text)?;

        assert_eq!(value["shape"]["rows"], 2);
        assert_eq!(value["shape"]["columns"], 16);
        assert_eq!(value["head"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["summary"]["mean_esg"], 55.0);
        assert_eq!(value["insights"]["illustrative"], true);
        assert_eq!(value["output"], "r.html");
        Ok(())
    }

    #[test]
    fn test_render_report_minimal() {
        let data = ReportData::from_dataset(&sample(), 5, "now");
        let text = render_report(&data, output_formats::MINIMAL, "r.html");
        assert!(text.starts_with("shape 2 16"));
        assert!(text.contains("mean_esg 55.00"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_render_dashboard_formats() -> Result<(), serde_json::Error> {
        let dataset = sample();
        let data = DashboardData::build(&dataset, &FilterSelection::all(&dataset), "now");

        let text = render_dashboard(&data, output_formats::TEXT, "d.html");
        assert!(text.contains("Records: 2 of 2"));
        assert!(text.contains("Top industry by ESG: Retail (70.00)"));

        let minimal = render_dashboard(&data, output_formats::MINIMAL, "d.html");
        assert_eq!(minimal.lines().next(), Some("records 2"));

        let value: serde_json::Value =
            serde_json::from_str(&render_dashboard(&data, output_formats::JSON, "d.html"))?;
        assert_eq!(value["dashboard"]["summary"]["records"], 2);
        assert_eq!(value["output"], "d.html");
        Ok(())
    }

    #[test]
    fn test_render_dashboard_empty_selection() {
        let dataset = sample();
        let selection = FilterSelection::all(&dataset).with_regions(Vec::<String>::new());
        let data = DashboardData::build(&dataset, &selection, "now");
        let text = render_dashboard(&data, output_formats::TEXT, "d.html");
        assert!(text.contains("No data for the current selection"));
        assert!(text.contains("Records: 0 of 2"));
    }
}
