//! CSV ingest and normalization.
//!
//! One loader serves every indicator: the `IndicatorSpec` says which columns
//! hold the period descriptor, which are numeric, and which are categorical
//! tags. The loader turns each source row into a `Row` with a canonical date.
//!
//! Policy:
//! - **Strict schema** for the configured columns (clear errors + exit code 2)
//! - **Silent row drops** for unparseable periods (counted and logged at debug)
//! - **Absent, never zero** for missing or malformed numbers

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::domain::{DatasetTable, Indicator, IndicatorSpec, Row};
use crate::error::AppError;
use crate::normalize::{coerce_number, normalize_period};

/// A source row that did not make it into the table.
#[derive(Debug, Clone)]
pub struct DroppedRow {
    pub line: usize,
    pub reason: String,
}

/// Loader output: the normalized table plus bookkeeping about the source.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: DatasetTable,
    pub rows_read: usize,
    pub dropped: Vec<DroppedRow>,
}

/// Column positions resolved against the CSV header.
#[derive(Debug, Clone)]
struct Layout {
    year: Option<usize>,
    period: usize,
    values: Vec<usize>,
    tags: Vec<usize>,
}

/// Load an indicator's CSV file from disk.
pub fn load_table(path: &Path, indicator: Indicator) -> Result<LoadedTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_table(file, indicator)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", path.display())))
}

/// Read and normalize an indicator table from any CSV source.
pub fn read_table<R: Read>(source: R, indicator: Indicator) -> Result<LoadedTable, AppError> {
    let spec = indicator.spec();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let layout = resolve_layout(spec, &header_map)?;

    let mut rows = Vec::new();
    let mut dropped = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and CSV lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!(indicator = spec.key, line, error = %e, "dropping malformed CSV record");
                dropped.push(DroppedRow {
                    line,
                    reason: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &layout, spec) {
            Ok(row) => rows.push(row),
            Err(reason) => {
                debug!(indicator = spec.key, line, %reason, "dropping row");
                dropped.push(DroppedRow { line, reason });
            }
        }
    }

    let table = DatasetTable::new(
        indicator,
        spec.value_columns.iter().map(|c| c.to_string()).collect(),
        spec.tag_columns.iter().map(|c| c.to_string()).collect(),
        rows,
    );

    Ok(LoadedTable {
        table,
        rows_read,
        dropped,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // UTF-8 CSVs saved by spreadsheet tools may carry a BOM on the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_layout(spec: &IndicatorSpec, header_map: &HashMap<String, usize>) -> Result<Layout, AppError> {
    let year = spec
        .period
        .year_column
        .map(|name| require_column(header_map, name))
        .transpose()?;
    let period = require_column(header_map, spec.period.period_column)?;

    let values = spec
        .value_columns
        .iter()
        .map(|name| require_column(header_map, name))
        .collect::<Result<Vec<_>, _>>()?;
    let tags = spec
        .tag_columns
        .iter()
        .map(|name| require_column(header_map, name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Layout {
        year,
        period,
        values,
        tags,
    })
}

fn require_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(&name.to_ascii_lowercase())
        .copied()
        .ok_or_else(|| AppError::input(format!("Missing required column: `{name}`")))
}

fn parse_row(record: &StringRecord, layout: &Layout, spec: &IndicatorSpec) -> Result<Row, String> {
    let label = field(record, layout.period);
    let year = layout.year.map(|idx| field(record, idx));

    let date = normalize_period(spec.period.mode, year, label).ok_or_else(|| match year {
        Some(y) => format!(
            "Unparseable {} period: year '{y}', period '{label}'",
            spec.period.mode.display_name()
        ),
        None => format!("Unparseable {} period '{label}'", spec.period.mode.display_name()),
    })?;

    let values = layout
        .values
        .iter()
        .map(|&idx| coerce_number(field(record, idx)))
        .collect();
    let tags = layout
        .tags
        .iter()
        .map(|&idx| field(record, idx).to_string())
        .collect();

    Ok(Row {
        date,
        label: label.to_string(),
        values,
        tags,
    })
}

/// Short (flexible) records read missing trailing fields as empty.
fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn reads_monthly_table_with_tags_and_placeholders() {
        let csv = "\u{feff}Year,Month,Region,CPI,Inflation_Rate\n\
                   2021,Feb,Urban,160.1,4.9\n\
                   2021,Jan,Urban,158.2,5.0\n\
                   2021,Jan,Rural,157.0,N/A\n\
                   2021,Smarch,Rural,1,1\n";
        let loaded = read_table(csv.as_bytes(), Indicator::Cpi).unwrap();

        assert_eq!(loaded.rows_read, 4);
        assert_eq!(loaded.dropped.len(), 1);
        assert_eq!(loaded.dropped[0].line, 5);

        let t = &loaded.table;
        assert_eq!(t.columns, vec!["Inflation_Rate", "CPI"]);
        assert_eq!(t.len(), 3);
        assert_eq!(t.rows()[0].date, ymd(2021, 1));
        assert_eq!(t.rows()[0].values, vec![Some(5.0), Some(158.2)]);
        assert_eq!(t.rows()[1].values, vec![None, Some(157.0)]);
        assert_eq!(t.rows()[1].tags, vec!["Rural"]);
        assert_eq!(t.rows()[2].date, ymd(2021, 2));
    }

    #[test]
    fn reads_quarterly_table() {
        let csv = "Year,Quarter,GDP_Growth_Percent\n2020,Q3,-7.5\n2020,Q1,3.1\n2020,Q9,1.0\n";
        let loaded = read_table(csv.as_bytes(), Indicator::Gdp).unwrap();
        let t = &loaded.table;
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows()[0].date, ymd(2020, 1));
        assert_eq!(t.rows()[1].date, ymd(2020, 7));
        assert_eq!(t.rows()[1].label, "Q3");
        assert_eq!(loaded.dropped.len(), 1);
    }

    #[test]
    fn missing_value_column_is_an_input_error() {
        let csv = "Year,Month,Exports_USD_Bn,Imports_USD_Bn\n2021,Jan,30,40\n";
        let err = read_table(csv.as_bytes(), Indicator::Trade).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.to_string().contains("Trade_Balance_USD_Bn"));
    }

    #[test]
    fn headers_match_case_insensitively() {
        let csv = "year,month,repo_rate_percent\n2022,May,4.4\n";
        let loaded = read_table(csv.as_bytes(), Indicator::RepoRate).unwrap();
        assert_eq!(loaded.table.present_values(0), vec![4.4]);
    }
}
