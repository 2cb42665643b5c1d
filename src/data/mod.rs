//! Dataset loading, caching and filtering
//!
//! This module turns the input CSV into an immutable `Dataset`, memoizes
//! the load per input file and builds filtered `View`s from a selection.

pub mod cache;
pub mod dataset;
pub mod filter;
pub mod loader;

// Re-export commonly used items
pub use cache::DatasetCache;
pub use dataset::{Dataset, LoadStats, View};
pub use filter::{FilterSelection, YearRange};
pub use loader::load_dataset;
