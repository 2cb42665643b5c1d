//! Dataset record and column types

use serde::Serialize;
use std::fmt;

use crate::core::constants::columns;

/// The eleven numeric metrics carried by every record, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Revenue,
    ProfitMargin,
    MarketCap,
    GrowthRate,
    EsgScore,
    EsgEnvironment,
    EsgSocial,
    EsgGovernance,
    CarbonEmissions,
    WaterUsage,
    EnergyConsumption,
}

impl NumericColumn {
    /// All numeric columns; also the column set of the correlation matrix
    pub const ALL: [NumericColumn; 11] = [
        NumericColumn::Revenue,
        NumericColumn::ProfitMargin,
        NumericColumn::MarketCap,
        NumericColumn::GrowthRate,
        NumericColumn::EsgScore,
        NumericColumn::EsgEnvironment,
        NumericColumn::EsgSocial,
        NumericColumn::EsgGovernance,
        NumericColumn::CarbonEmissions,
        NumericColumn::WaterUsage,
        NumericColumn::EnergyConsumption,
    ];

    /// Canonical snake_case column name
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Revenue => columns::REVENUE,
            NumericColumn::ProfitMargin => columns::PROFIT_MARGIN,
            NumericColumn::MarketCap => columns::MARKET_CAP,
            NumericColumn::GrowthRate => columns::GROWTH_RATE,
            NumericColumn::EsgScore => columns::ESG_SCORE,
            NumericColumn::EsgEnvironment => columns::ESG_ENVIRONMENT,
            NumericColumn::EsgSocial => columns::ESG_SOCIAL,
            NumericColumn::EsgGovernance => columns::ESG_GOVERNANCE,
            NumericColumn::CarbonEmissions => columns::CARBON_EMISSIONS,
            NumericColumn::WaterUsage => columns::WATER_USAGE,
            NumericColumn::EnergyConsumption => columns::ENERGY_CONSUMPTION,
        }
    }

    /// Human readable axis label
    pub fn label(self) -> &'static str {
        match self {
            NumericColumn::Revenue => "Revenue",
            NumericColumn::ProfitMargin => "Profit Margin",
            NumericColumn::MarketCap => "Market Cap",
            NumericColumn::GrowthRate => "Growth Rate",
            NumericColumn::EsgScore => "ESG Score",
            NumericColumn::EsgEnvironment => "ESG Environmental",
            NumericColumn::EsgSocial => "ESG Social",
            NumericColumn::EsgGovernance => "ESG Governance",
            NumericColumn::CarbonEmissions => "Carbon Emissions",
            NumericColumn::WaterUsage => "Water Usage",
            NumericColumn::EnergyConsumption => "Energy Consumption",
        }
    }

    /// Look a column up by its canonical name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|column| column.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One (company, year) observation after cleaning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyYearRecord {
    pub company_id: String,
    pub company_name: String,
    pub industry: String,
    pub region: String,
    pub year: i32,
    /// Indexed by `NumericColumn`; `None` marks a missing or uncoercible value
    pub metrics: [Option<f64>; 11],
}

impl CompanyYearRecord {
    /// Create a record with every metric missing
    pub fn new(
        company_id: impl Into<String>,
        company_name: impl Into<String>,
        industry: impl Into<String>,
        region: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            company_name: company_name.into(),
            industry: industry.into(),
            region: region.into(),
            year,
            metrics: [None; 11],
        }
    }

    /// Builder-style setter used mostly by tests and fixtures
    pub fn with(mut self, column: NumericColumn, value: f64) -> Self {
        self.set(column, Some(value));
        self
    }

    pub fn get(&self, column: NumericColumn) -> Option<f64> {
        self.metrics[column.index()]
    }

    pub fn set(&mut self, column: NumericColumn, value: Option<f64>) {
        self.metrics[column.index()] = value;
    }
}
