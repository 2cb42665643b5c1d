//! Aggregations over a filtered view
//!
//! Every function here is pure: it takes the current view and returns a
//! derived table. Empty views produce empty (or all-missing) results.

pub mod aggregate;
pub mod correlation;
pub mod describe;
pub mod regression;

// Re-export commonly used items
pub use aggregate::{
    GroupMean, SummaryMetrics, YearMean, mean_by_industry, mean_by_region, mean_by_year,
    summary_metrics,
};
pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use describe::{ColumnSummary, describe};
pub use regression::{TrendLine, ols_trend, scatter_points};
