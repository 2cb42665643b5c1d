//! Filter selection and view building
//!
//! A selection is three independent predicates (industry membership, region
//! membership, inclusive year range) combined with logical AND. Any of them
//! being empty simply produces an empty view.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::core::error::{EsgError, Result};
use crate::core::types::CompanyYearRecord;
use crate::data::dataset::{Dataset, View};

static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*([0-9]{1,6})[ \t]*(?:\.\.=?|-|:)[ \t]*([0-9]{1,6})[ \t]*$")
        .expect("static pattern")
});

static SINGLE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*([0-9]{1,6})[ \t]*$").expect("static pattern"));

/// Inclusive range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Parse `2015..2020`, `2015..=2020`, `2015-2020`, `2015:2020` or a single `2018`
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || {
            EsgError::InvalidArgument(format!(
                "Year range '{input}' is not valid. Expected START..END (e.g. 2015..2020) or a single year."
            ))
        };

        let (start, end) = if let Some(caps) = YEAR_RANGE.captures(input) {
            (
                caps[1].parse::<i32>().map_err(|_| invalid())?,
                caps[2].parse::<i32>().map_err(|_| invalid())?,
            )
        } else if let Some(caps) = SINGLE_YEAR.captures(input) {
            let year = caps[1].parse::<i32>().map_err(|_| invalid())?;
            (year, year)
        } else {
            return Err(invalid());
        };

        if start > end {
            return Err(EsgError::InvalidArgument(format!(
                "Year range '{input}' starts after it ends ({start} > {end})."
            )));
        }

        Ok(Self::new(start, end))
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// The user's current industry, region and year choices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub industries: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub years: YearRange,
}

impl FilterSelection {
    /// Default selection: every industry, every region and the full year range
    pub fn all(dataset: &Dataset) -> Self {
        let (start, end) = dataset.year_bounds().unwrap_or((0, 0));
        Self {
            industries: dataset.industries().into_iter().collect(),
            regions: dataset.regions().into_iter().collect(),
            years: YearRange::new(start, end),
        }
    }

    /// Replace the industry choice
    pub fn with_industries<I, S>(mut self, industries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.industries = industries.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the region choice
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the year range
    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = years;
        self
    }

    pub fn matches_industry(&self, record: &CompanyYearRecord) -> bool {
        self.industries.contains(&record.industry)
    }

    pub fn matches_region(&self, record: &CompanyYearRecord) -> bool {
        self.regions.contains(&record.region)
    }

    pub fn matches_year(&self, record: &CompanyYearRecord) -> bool {
        self.years.contains(record.year)
    }

    /// All three predicates at once
    pub fn matches(&self, record: &CompanyYearRecord) -> bool {
        self.matches_industry(record) && self.matches_region(record) && self.matches_year(record)
    }

    /// Build the filtered view of a dataset
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> View<'a> {
        let view = View::from_refs(dataset.records().iter().filter(|r| self.matches(r)).collect());
        debug!(
            "Filter {} kept {} of {} records",
            self,
            view.len(),
            dataset.len()
        );
        view
    }

    /// True when any dimension selects nothing
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty() || self.regions.is_empty()
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "industries={}, regions={}, years={}",
            self.industries.len(),
            self.regions.len(),
            self.years
        )
    }
}
