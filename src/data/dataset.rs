//! The cleaned, immutable table and the filtered views built on top of it

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::types::CompanyYearRecord;

/// Counters collected while cleaning a CSV file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    /// Data rows read from the file, header excluded
    pub raw_rows: usize,
    /// Exact duplicate rows dropped
    pub duplicate_rows: usize,
    /// Non-empty numeric cells that could not be parsed and became missing
    pub coerced_to_missing: usize,
    /// Rows dropped because their year was not an integer
    pub invalid_years: usize,
}

/// A loaded dataset, held read-only for the lifetime of a session
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    source: PathBuf,
    columns: Vec<String>,
    records: Vec<CompanyYearRecord>,
    stats: LoadStats,
}

impl Dataset {
    pub fn new(
        source: impl Into<PathBuf>,
        columns: Vec<String>,
        records: Vec<CompanyYearRecord>,
        stats: LoadStats,
    ) -> Self {
        Self {
            source: source.into(),
            columns,
            records,
            stats,
        }
    }

    /// Build an in-memory dataset with canonical columns
    pub fn from_records(records: Vec<CompanyYearRecord>) -> Self {
        let stats = LoadStats {
            raw_rows: records.len(),
            ..LoadStats::default()
        };
        Self::new(
            "<memory>",
            crate::core::constants::columns::REQUIRED
                .iter()
                .map(|c| c.to_string())
                .collect(),
            records,
            stats,
        )
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Normalized column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[CompanyYearRecord] {
        &self.records
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct industries, sorted
    pub fn industries(&self) -> Vec<String> {
        self.distinct(|r| &r.industry)
    }

    /// Distinct regions, sorted
    pub fn regions(&self) -> Vec<String> {
        self.distinct(|r| &r.region)
    }

    /// Smallest and largest year present, `None` for an empty dataset
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// A view over every record
    pub fn view(&self) -> View<'_> {
        View {
            records: self.records.iter().collect(),
        }
    }

    fn distinct<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&CompanyYearRecord) -> &String,
    {
        self.records
            .iter()
            .map(|r| field(r).clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// A filtered, non-persisted subset of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    records: Vec<&'a CompanyYearRecord>,
}

impl<'a> View<'a> {
    pub fn from_refs(records: Vec<&'a CompanyYearRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a CompanyYearRecord> + '_ {
        self.records.iter().copied()
    }

    /// Narrow the view further, keeping record order
    pub fn retain<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&CompanyYearRecord) -> bool,
    {
        self.records.retain(|r| predicate(r));
        self
    }
}
