//! Page scaffolding shared by the report and the dashboard

use serde::Serialize;

use crate::reporting::ReportError;
use crate::reporting::charts::{Chart, ChartConfig};

/// Constants for page styling and layout
pub mod page_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Shown in place of a chart or table when the view is empty
    pub const EMPTY_SELECTION: &str = "No data for the current selection";
}

/// Escape text for use inside HTML elements and attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap a body into a complete HTML document
pub fn page(title: &str, body: &str, charts_script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
    {}
    <script>{}</script>
    <script>{}</script>
</body>
</html>"#,
        escape(title),
        page_constants::CHART_JS_CDN,
        generate_css(),
        body,
        charts_script,
        generate_javascript()
    )
}

/// Page header with title and generation timestamp
pub fn header_section(title: &str, subtitle: &str, timestamp: &str) -> String {
    format!(
        r#"
            <div class="header">
                <h1>{}</h1>
                <p>{}</p>
                <p class="timestamp">Generated on {} by esgdash</p>
            </div>
            "#,
        escape(title),
        escape(subtitle),
        escape(timestamp)
    )
}

/// A single statistics card
pub fn stat_card(icon: &str, value: &str, label: &str, style_class: &str) -> String {
    format!(
        r#"
            <div class="stat-card">
                <div class="stat-icon {}">{}</div>
                <div class="stat-value">{}</div>
                <div class="stat-label">{}</div>
            </div>
            "#,
        style_class,
        icon,
        escape(value),
        escape(label)
    )
}

/// Placeholder panel for an empty selection
pub fn empty_panel(title: &str) -> String {
    format!(
        r#"
            <div class="chart-container">
                <h3 class="chart-title">{}</h3>
                <div class="empty">{}</div>
            </div>
            "#,
        escape(title),
        page_constants::EMPTY_SELECTION
    )
}

/// Canvas panel for a chart, or the placeholder when it has nothing to draw
pub fn chart_panel(chart: &Chart) -> String {
    if chart.is_empty() {
        return empty_panel(&chart.title);
    }
    format!(
        r#"
            <div class="chart-container">
                <h3 class="chart-title">{}</h3>
                <canvas id="{}" height="320"></canvas>
            </div>
            "#,
        escape(&chart.title),
        escape(&chart.id)
    )
}

/// Panel holding pre-rendered HTML such as the heatmap table
pub fn table_panel(title: &str, table: &str) -> String {
    format!(
        r#"
            <div class="chart-container">
                <h3 class="chart-title">{}</h3>
                <div class="table-scroll">{}</div>
            </div>
            "#,
        escape(title),
        table
    )
}

/// Bulleted list section, used for insights and recommendations
pub fn list_section(title: &str, note: Option<&str>, items: &[&str], style_class: &str) -> String {
    let list: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    let note = note
        .map(|n| format!(r#"<p class="note">{}</p>"#, escape(n)))
        .unwrap_or_default();

    format!(
        r#"
            <div class="{}">
                <h3>{}</h3>
                {}
                <ul>{}</ul>
            </div>
            "#,
        style_class,
        escape(title),
        note,
        list
    )
}

#[derive(Serialize)]
struct ChartEntry<'a> {
    id: &'a str,
    config: &'a ChartConfig,
}

/// Script assigning every drawable chart config to `window.esgCharts`
pub fn charts_script(charts: &[&Chart]) -> Result<String, ReportError> {
    let entries: Vec<ChartEntry<'_>> = charts
        .iter()
        .filter(|c| !c.is_empty())
        .map(|c| ChartEntry {
            id: &c.id,
            config: &c.config,
        })
        .collect();
    let json = serde_json::to_string(&entries)?;
    // Keep a literal "</script>" inside the data from closing the tag
    Ok(format!(
        "window.esgCharts = {};",
        json.replace("</", "<\\/")
    ))
}

fn generate_css() -> &'static str {
    r#"
        :root {
            --primary-color: #2563eb;
            --success-color: #059669;
            --warning-color: #d97706;
            --error-color: #dc2626;
            --bg-color: #f8fafc;
            --card-bg: #ffffff;
            --border-color: #e2e8f0;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1280px; margin: 0 auto; padding: 2rem; }
        .layout { display: grid; grid-template-columns: 260px 1fr; gap: 2rem; }

        .header {
            text-align: center;
            margin-bottom: 2rem;
            padding: 2rem;
            background: linear-gradient(135deg, #047857, #10b981);
            color: white;
            border-radius: 12px;
        }
        .header h1 { font-size: 2.2rem; font-weight: 700; }
        .header .timestamp { font-size: 0.85rem; opacity: 0.85; }

        .sidebar {
            background: var(--card-bg);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            padding: 1.5rem;
            align-self: start;
        }
        .sidebar h3 { font-size: 1rem; margin: 1rem 0 0.5rem; }
        .sidebar ul { list-style: none; font-size: 0.9rem; }
        .sidebar li.off { color: var(--text-secondary); text-decoration: line-through; }

        .stats-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }
        .stat-card {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
        }
        .stat-icon { font-size: 1.5rem; margin-bottom: 0.5rem; }
        .stat-value { font-size: 1.8rem; font-weight: 700; }
        .stat-label {
            color: var(--text-secondary);
            font-size: 0.85rem;
            text-transform: uppercase;
            letter-spacing: 0.5px;
        }

        .success { color: var(--success-color); }
        .warning { color: var(--warning-color); }
        .error { color: var(--error-color); }
        .info { color: var(--primary-color); }

        .chart-container {
            background: var(--card-bg);
            padding: 1.5rem;
            border-radius: 12px;
            border: 1px solid var(--border-color);
            margin-bottom: 2rem;
        }
        .chart-title { font-size: 1.2rem; font-weight: 600; margin-bottom: 1rem; }
        .empty { padding: 2rem; text-align: center; color: var(--text-secondary); }
        .table-scroll { overflow-x: auto; }

        table { border-collapse: collapse; font-size: 0.85rem; }
        th, td { padding: 0.4rem 0.6rem; border: 1px solid var(--border-color); text-align: right; }
        th { background: var(--bg-color); text-align: left; }
        table.heatmap td { min-width: 3.5rem; text-align: center; }
        td.na { color: var(--text-secondary); text-align: center; }

        .tabs { display: flex; gap: 0.5rem; margin-bottom: 1.5rem; flex-wrap: wrap; }
        .tab-button {
            border: 1px solid var(--border-color);
            background: var(--card-bg);
            padding: 0.5rem 1rem;
            border-radius: 8px;
            cursor: pointer;
        }
        .tab-button.active { background: var(--primary-color); color: white; }
        .tab-panel { display: none; }
        .tab-panel.active { display: block; }

        .insights, .recommendations {
            border-radius: 12px;
            padding: 1.5rem;
            margin-bottom: 2rem;
        }
        .insights { background: #eff6ff; border: 1px solid #93c5fd; }
        .recommendations { background: linear-gradient(135deg, #fef3c7, #fed7aa); border: 1px solid #f59e0b; }
        .insights ul, .recommendations ul { padding-left: 1.5rem; }
        .note { font-size: 0.85rem; color: var(--text-secondary); margin-bottom: 0.5rem; }

        @media (max-width: 900px) {
            .container { padding: 1rem; }
            .layout { grid-template-columns: 1fr; }
        }
        "#
}

fn generate_javascript() -> &'static str {
    r#"
        document.addEventListener('DOMContentLoaded', function() {
            document.querySelectorAll('.tab-button').forEach(function(button) {
                button.addEventListener('click', function() {
                    document.querySelectorAll('.tab-button, .tab-panel').forEach(function(el) {
                        el.classList.remove('active');
                    });
                    button.classList.add('active');
                    const panel = document.getElementById(button.dataset.tab);
                    if (panel) { panel.classList.add('active'); }
                });
            });

            if (typeof Chart !== 'undefined' && window.esgCharts) {
                window.esgCharts.forEach(function(entry) {
                    const ctx = document.getElementById(entry.id);
                    if (ctx) {
                        new Chart(ctx, entry.config);
                    }
                });
            }
        });
        "#
}
