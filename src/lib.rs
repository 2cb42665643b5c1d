//! esgdash: company ESG and financial analytics rendered as HTML
//!
//! The crate loads a company/year CSV into an immutable [`Dataset`], narrows
//! it with a [`FilterSelection`], aggregates the resulting view and renders
//! either a batch report or a filterable dashboard.

pub mod analysis;
pub mod config;
pub mod core;
pub mod data;
pub mod reporting;
pub mod ui;

// Re-export the main types for convenience
pub use config::{CliConfig, Config};
pub use self::core::{CompanyYearRecord, EsgError, NumericColumn, Result};
pub use data::{Dataset, DatasetCache, FilterSelection, View, YearRange, load_dataset};
pub use reporting::{DashboardData, HtmlDashboard, HtmlReport, ReportData};
