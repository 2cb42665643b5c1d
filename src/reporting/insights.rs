//! Fixed narrative text shown at the end of the report
//!
//! These statements are static and are not derived from the loaded data.

/// Caption printed above the insights whenever they are shown
pub const ILLUSTRATIVE_NOTE: &str =
    "Illustrative observations (static text, not computed from the loaded data)";

pub const INSIGHTS: [&str; 5] = [
    "Negative correlation between carbon emissions and ESG score → reducing emissions improves ESG.",
    "Higher revenue companies tend to show higher ESG scores → bigger firms invest in sustainability.",
    "Industry differences exist (e.g., Retail vs Energy).",
    "ESG performance varies across regions.",
    "ESG scores show gradual improvement over years.",
];

pub const RECOMMENDATIONS: [&str; 5] = [
    "Set carbon reduction targets per industry.",
    "Incentivize water and energy efficiency.",
    "Link executive compensation to ESG KPIs.",
    "Encourage transparency in governance practices.",
    "Share regional best practices to raise ESG globally.",
];
