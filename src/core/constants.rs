/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes all magic strings, numbers, and other literal values
/// used across the application, making them easier to maintain and modify.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced output
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - plain text without colors or emojis
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Default file locations
pub mod paths {
    /// Dataset read when no `--data` flag or config entry is given
    pub const DEFAULT_DATA_FILE: &str = "company_esg_financial_dataset.csv";
    /// Where `esgdash report` writes its HTML
    pub const DEFAULT_REPORT_FILE: &str = "esg_report.html";
    /// Where `esgdash dashboard` writes its HTML
    pub const DEFAULT_DASHBOARD_FILE: &str = "esg_dashboard.html";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE_NAME: &str = ".esgdash.toml";
    /// How many parent directories are searched for a config file
    pub const CONFIG_PARENT_DEPTH: usize = 3;
}

/// Canonical column names after cleaning
pub mod columns {
    pub const COMPANY_ID: &str = "company_id";
    pub const COMPANY_NAME: &str = "company_name";
    pub const INDUSTRY: &str = "industry";
    pub const REGION: &str = "region";
    pub const YEAR: &str = "year";
    pub const REVENUE: &str = "revenue";
    pub const PROFIT_MARGIN: &str = "profit_margin";
    pub const MARKET_CAP: &str = "market_cap";
    pub const GROWTH_RATE: &str = "growth_rate";
    pub const ESG_SCORE: &str = "esg_score";
    pub const ESG_ENVIRONMENT: &str = "esg_environment";
    pub const ESG_SOCIAL: &str = "esg_social";
    pub const ESG_GOVERNANCE: &str = "esg_governance";
    pub const CARBON_EMISSIONS: &str = "carbon_emissions";
    pub const WATER_USAGE: &str = "water_usage";
    pub const ENERGY_CONSUMPTION: &str = "energy_consumption";

    /// Every column a dataset must provide, in output order
    pub const REQUIRED: [&str; 16] = [
        COMPANY_ID,
        COMPANY_NAME,
        INDUSTRY,
        REGION,
        YEAR,
        REVENUE,
        PROFIT_MARGIN,
        MARKET_CAP,
        GROWTH_RATE,
        ESG_SCORE,
        ESG_ENVIRONMENT,
        ESG_SOCIAL,
        ESG_GOVERNANCE,
        CARBON_EMISSIONS,
        WATER_USAGE,
        ENERGY_CONSUMPTION,
    ];
}

/// Default configuration values
pub mod defaults {
    /// Rows printed by the report's dataset preview
    pub const HEAD_ROWS: usize = 5;
    /// Upper bound accepted for `head_rows`
    pub const MAX_HEAD_ROWS: usize = 100;
    /// Decimal places used for summary metrics
    pub const SUMMARY_DECIMALS: i32 = 2;
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for chart output
    pub const CHART_EMOJI: &str = "📊";
    /// Emoji for dataset information
    pub const FILE_EMOJI: &str = "📁";
    /// Emoji heading the insights block
    pub const INSIGHT_EMOJI: &str = "🔎";
    /// Emoji heading the recommendations block
    pub const POLICY_EMOJI: &str = "🌍";
    /// Placeholder shown for metrics of an empty view
    pub const NO_DATA: &str = "No data";
}
