//! CSV loading and cleaning
//!
//! One cleaning path serves both the report and the dashboard: headers are
//! trimmed, lowercased and resolved to canonical snake_case names, duplicate
//! rows are dropped by value, and the numeric columns are coerced with
//! invalid-to-missing semantics.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::core::constants::columns;
use crate::core::error::{EsgError, Result};
use crate::core::types::{CompanyYearRecord, NumericColumn};
use crate::data::dataset::{Dataset, LoadStats};

static NON_ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-z0-9]+").expect("static pattern"));

/// Compact header spellings and the canonical column each one maps to
const COLUMN_ALIASES: [(&str, &str); 19] = [
    ("companyid", columns::COMPANY_ID),
    ("companyname", columns::COMPANY_NAME),
    ("industry", columns::INDUSTRY),
    ("region", columns::REGION),
    ("year", columns::YEAR),
    ("revenue", columns::REVENUE),
    ("profitmargin", columns::PROFIT_MARGIN),
    ("marketcap", columns::MARKET_CAP),
    ("marketcapitalization", columns::MARKET_CAP),
    ("growthrate", columns::GROWTH_RATE),
    ("esgoverall", columns::ESG_SCORE),
    ("esgscore", columns::ESG_SCORE),
    ("esgenvironmental", columns::ESG_ENVIRONMENT),
    ("esgenvironment", columns::ESG_ENVIRONMENT),
    ("esgsocial", columns::ESG_SOCIAL),
    ("esggovernance", columns::ESG_GOVERNANCE),
    ("carbonemissions", columns::CARBON_EMISSIONS),
    ("waterusage", columns::WATER_USAGE),
    ("energyconsumption", columns::ENERGY_CONSUMPTION),
];

/// Resolve a raw header to its canonical column name, if it is a known column
pub fn canonical_column(raw: &str) -> Option<&'static str> {
    let lowered = raw.trim().to_lowercase();
    let compact = NON_ALPHANUMERIC.replace_all(&lowered, "");
    COLUMN_ALIASES
        .iter()
        .find(|(alias, _)| *alias == compact)
        .map(|(_, canonical)| *canonical)
}

/// Normalize a header: canonical name when known, otherwise trimmed lowercase
pub fn normalize_column_name(raw: &str) -> String {
    canonical_column(raw)
        .map(str::to_string)
        .unwrap_or_else(|| raw.trim().to_lowercase())
}

/// Parse a numeric cell; anything that is not a finite number becomes missing
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a year cell, accepting integral floats such as `2019.0`
pub fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .filter(|v| *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX))
            .map(|v| v as i32)
    })
}

/// One cell of a duplicate-detection key
#[derive(Debug, PartialEq, Eq, Hash)]
enum KeyCell {
    Text(String),
    Number(u64),
}

/// Key comparing numeric and year cells by parsed value, so `100` and `100.0` collide
fn row_key(row: &StringRecord, parsed: &FxHashSet<usize>) -> Vec<KeyCell> {
    row.iter()
        .enumerate()
        .map(|(position, raw)| {
            let value = parsed.contains(&position).then(|| coerce_numeric(raw)).flatten();
            match value {
                // -0.0 and 0.0 share a key
                Some(v) => KeyCell::Number((v + 0.0).to_bits()),
                None => KeyCell::Text(raw.to_string()),
            }
        })
        .collect()
}

/// Load and clean a CSV file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(EsgError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path)?;
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    read_dataset(reader, path)
}

/// Clean CSV data from any reader; `source` is used for error messages
pub fn read_dataset<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    source: &Path,
) -> Result<Dataset> {
    let headers = reader.headers()?.clone();
    let column_names: Vec<String> = headers.iter().map(normalize_column_name).collect();
    let index = build_column_index(&headers, source)?;

    let mut stats = LoadStats::default();
    let parsed: FxHashSet<usize> = NumericColumn::ALL
        .iter()
        .map(|column| column.name())
        .chain([columns::YEAR])
        .filter_map(|column| index.get(column).copied())
        .collect();
    let mut seen: FxHashSet<Vec<KeyCell>> = FxHashSet::default();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        stats.raw_rows += 1;

        if !seen.insert(row_key(&row, &parsed)) {
            stats.duplicate_rows += 1;
            continue;
        }

        match build_record(&row, &index, &mut stats) {
            Some(record) => records.push(record),
            None => {
                stats.invalid_years += 1;
                warn!(
                    "Row {} has a non-integer year '{}' and was dropped",
                    stats.raw_rows,
                    field(&row, &index, columns::YEAR)
                );
            }
        }
    }

    debug!(
        "Cleaned {}: {} rows read, {} duplicates, {} cells coerced to missing",
        source.display(),
        stats.raw_rows,
        stats.duplicate_rows,
        stats.coerced_to_missing
    );

    Ok(Dataset::new(source, column_names, records, stats))
}

/// Map every required canonical column to its position, failing on the first absent one
fn build_column_index(
    headers: &StringRecord,
    source: &Path,
) -> Result<FxHashMap<&'static str, usize>> {
    let mut index = FxHashMap::default();
    for (position, raw) in headers.iter().enumerate() {
        if let Some(canonical) = canonical_column(raw) {
            index.entry(canonical).or_insert(position);
        }
    }

    if let Some(missing) = columns::REQUIRED
        .iter()
        .find(|column| !index.contains_key(*column))
    {
        return Err(EsgError::MissingColumn {
            column: missing.to_string(),
            path: source.display().to_string(),
        });
    }

    Ok(index)
}

fn field<'r>(row: &'r StringRecord, index: &FxHashMap<&'static str, usize>, column: &str) -> &'r str {
    index
        .get(column)
        .and_then(|&position| row.get(position))
        .unwrap_or("")
}

fn build_record(
    row: &StringRecord,
    index: &FxHashMap<&'static str, usize>,
    stats: &mut LoadStats,
) -> Option<CompanyYearRecord> {
    let year = parse_year(field(row, index, columns::YEAR))?;

    let mut record = CompanyYearRecord::new(
        field(row, index, columns::COMPANY_ID),
        field(row, index, columns::COMPANY_NAME),
        field(row, index, columns::INDUSTRY),
        field(row, index, columns::REGION),
        year,
    );

    for column in NumericColumn::ALL {
        let raw = field(row, index, column.name());
        let value = coerce_numeric(raw);
        if value.is_none() && !raw.is_empty() {
            stats.coerced_to_missing += 1;
            debug!("Coerced '{raw}' in column {column} to missing");
        }
        record.set(column, value);
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "CompanyID,CompanyName,Industry,Region,Year,Revenue,ProfitMargin,MarketCap,GrowthRate,ESG_Overall,ESG_Environmental,ESG_Social,ESG_Governance,CarbonEmissions,WaterUsage,EnergyConsumption";

    fn from_str(content: &str) -> Result<Dataset> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());
        read_dataset(reader, Path::new("test.csv"))
    }

    #[test]
    fn test_canonical_column_aliases() {
        assert_eq!(canonical_column("ESG_Overall"), Some("esg_score"));
        assert_eq!(canonical_column(" esg score "), Some("esg_score"));
        assert_eq!(canonical_column("esg_score"), Some("esg_score"));
        assert_eq!(canonical_column("CompanyID"), Some("company_id"));
        assert_eq!(canonical_column("ESG_Environmental"), Some("esg_environment"));
        assert_eq!(canonical_column("CarbonEmissions"), Some("carbon_emissions"));
        assert_eq!(canonical_column("Ticker"), None);
    }

    #[test]
    fn test_normalize_unknown_column() {
        assert_eq!(normalize_column_name("  Ticker "), "ticker");
        assert_eq!(normalize_column_name("MarketCap"), "market_cap");
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(coerce_numeric("12.5"), Some(12.5));
        assert_eq!(coerce_numeric(" -3 "), Some(-3.0));
        assert_eq!(coerce_numeric("1e3"), Some(1000.0));
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("n/a"), None);
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric("inf"), None);
        assert_eq!(coerce_numeric("1,000"), None);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2020"), Some(2020));
        assert_eq!(parse_year("2019.0"), Some(2019));
        assert_eq!(parse_year("2019.5"), None);
        assert_eq!(parse_year("soon"), None);
    }

    #[test]
    fn test_load_cleans_and_coerces() -> Result<()> {
        let csv = format!(
            "{HEADER}\n1,Acme,Energy,Europe,2020,100,0.1,500,0.02,40,30,50,45,100,20,300\n2,Shop,Retail,Asia,2020,oops,0.2,800,0.03,70,75,65,70,10,,50\n"
        );
        let dataset = from_str(&csv)?;

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns()[9], "esg_score");
        let shop = &dataset.records()[1];
        assert_eq!(shop.industry, "Retail");
        assert_eq!(shop.get(NumericColumn::Revenue), None);
        assert_eq!(shop.get(NumericColumn::WaterUsage), None);
        assert_eq!(shop.get(NumericColumn::EsgScore), Some(70.0));
        assert_eq!(dataset.stats().coerced_to_missing, 1);
        Ok(())
    }

    #[test]
    fn test_duplicates_are_dropped_keeping_first() -> Result<()> {
        let row = "1,Acme,Energy,Europe,2020,100,0.1,500,0.02,40,30,50,45,100,20,300";
        let other = "2,Shop,Retail,Asia,2021,5,0.2,800,0.03,70,75,65,70,10,5,50";
        let csv = format!("{HEADER}\n{row}\n{other}\n{row}\n{row}\n");
        let dataset = from_str(&csv)?;

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.stats().raw_rows, 4);
        assert_eq!(dataset.stats().duplicate_rows, 2);
        assert_eq!(dataset.records()[0].company_id, "1");
        assert_eq!(dataset.records()[1].company_id, "2");
        Ok(())
    }

    #[test]
    fn test_duplicates_compare_parsed_numbers() -> Result<()> {
        let csv = format!(
            "{HEADER}\n1,Acme,Energy,Europe,2020,100,0.1,500,0.02,40,30,50,45,100,20,300\n1,Acme,Energy,Europe,2020.0,100.0,0.10,5e2,0.02,40,30,50,45,100,20,300\n"
        );
        let dataset = from_str(&csv)?;

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.stats().duplicate_rows, 1);
        assert_eq!(dataset.records()[0].get(NumericColumn::Revenue), Some(100.0));
        Ok(())
    }

    #[test]
    fn test_unparseable_cells_compare_as_text() -> Result<()> {
        let csv = format!(
            "{HEADER}\n1,Acme,Energy,Europe,2020,n/a,0.1,500,0.02,40,30,50,45,100,20,300\n1,Acme,Energy,Europe,2020,,0.1,500,0.02,40,30,50,45,100,20,300\n"
        );
        let dataset = from_str(&csv)?;

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.stats().duplicate_rows, 0);
        Ok(())
    }

    #[test]
    fn test_rows_differing_in_one_field_are_kept() -> Result<()> {
        let csv = format!(
            "{HEADER}\n1,Acme,Energy,Europe,2020,100,0.1,500,0.02,40,30,50,45,100,20,300\n1,Acme,Energy,Europe,2020,100,0.1,500,0.02,41,30,50,45,100,20,300\n"
        );
        assert_eq!(from_str(&csv)?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let header = HEADER.replace(",ESG_Overall", "");
        let csv = format!("{header}\n");
        match from_str(&csv) {
            Err(EsgError::MissingColumn { column, path }) => {
                assert_eq!(column, "esg_score");
                assert_eq!(path, "test.csv");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_year_rows_are_dropped() -> Result<()> {
        let csv = format!(
            "{HEADER}\n1,Acme,Energy,Europe,unknown,100,0.1,500,0.02,40,30,50,45,100,20,300\n"
        );
        let dataset = from_str(&csv)?;
        assert!(dataset.is_empty());
        assert_eq!(dataset.stats().invalid_years, 1);
        Ok(())
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let result = load_dataset("/definitely/not/here/data.csv");
        assert!(matches!(result, Err(EsgError::FileNotFound(_))));
    }

    #[test]
    fn test_load_dataset_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{HEADER}")?;
        writeln!(
            file,
            " 1 , Acme ,Energy,Europe,2020,100,0.1,500,0.02,40,30,50,45,100,20,300"
        )?;
        let dataset = load_dataset(file.path())?;
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].company_name, "Acme");
        assert_eq!(dataset.source(), file.path());
        Ok(())
    }

    #[test]
    fn test_header_only_file_is_empty_dataset() -> Result<()> {
        let dataset = from_str(&format!("{HEADER}\n"))?;
        assert!(dataset.is_empty());
        assert_eq!(dataset.year_bounds(), None);
        Ok(())
    }
}
