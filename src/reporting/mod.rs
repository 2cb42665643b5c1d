//! Charts, HTML rendering and structured logging
//!
//! This module turns aggregation results into Chart.js configurations and
//! HTML documents (the batch report and the dashboard), and holds the
//! logging helpers used across the application.

pub mod charts;
pub mod dashboard;
pub mod html;
pub mod insights;
pub mod logging;
pub mod report;

use std::io;

// Re-export commonly used items
pub use charts::{Chart, ChartKind};
pub use dashboard::{DashboardData, HtmlDashboard};
pub use report::{HtmlReport, ReportData};

/// Error type for chart serialization and HTML output
#[derive(Debug)]
pub enum ReportError {
    FileWrite(io::Error),
    Serialization(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::FileWrite(e) => write!(f, "Failed to write HTML file: {e}"),
            ReportError::Serialization(e) => write!(f, "Failed to serialize chart data: {e}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::FileWrite(e) => Some(e),
            ReportError::Serialization(_) => None,
        }
    }
}

impl From<io::Error> for ReportError {
    fn from(e: io::Error) -> Self {
        ReportError::FileWrite(e)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_report_error_display() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let error = ReportError::FileWrite(io_error);
        assert!(format!("{error}").contains("Failed to write HTML file"));
        assert!(error.source().is_some());

        let error = ReportError::Serialization("bad float".to_string());
        assert_eq!(format!("{error}"), "Failed to serialize chart data: bad float");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_report_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error: ReportError = io_error.into();
        assert!(matches!(error, ReportError::FileWrite(_)));
    }
}
