//! The normalized, date-indexed table built once per indicator.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::catalog::Indicator;
use super::types::TagFilter;

/// One normalized source row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Canonical date: the first day of a calendar month.
    pub date: NaiveDate,
    /// The raw period label as it appeared in the source (e.g. `Q3`, `Sept`).
    pub label: String,
    /// Numeric values aligned with `DatasetTable::columns`.
    pub values: Vec<Option<f64>>,
    /// Categorical tags aligned with `DatasetTable::tag_columns`.
    pub tags: Vec<String>,
}

/// Rows of a single indicator, sorted ascending by canonical date.
///
/// Rows sharing a date are kept (e.g. Urban and Rural CPI for the same month);
/// use `aggregate_by_date` to collapse them.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetTable {
    pub indicator: Indicator,
    pub columns: Vec<String>,
    pub tag_columns: Vec<String>,
    rows: Vec<Row>,
}

impl DatasetTable {
    pub fn new(indicator: Indicator, columns: Vec<String>, tag_columns: Vec<String>, mut rows: Vec<Row>) -> Self {
        // Stable: rows sharing a date keep their source order.
        rows.sort_by_key(|r| r.date);
        Self {
            indicator,
            columns,
            tag_columns,
            rows,
        }
    }

    /// A table with the same schema holding a subset of this table's rows.
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self::new(self.indicator, self.columns.clone(), self.tag_columns.clone(), rows)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn min_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    /// Case-insensitive lookup of a numeric column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        position_ignore_case(&self.columns, name)
    }

    /// Case-insensitive lookup of a tag column.
    pub fn tag_index(&self, name: &str) -> Option<usize> {
        position_ignore_case(&self.tag_columns, name)
    }

    /// Keep rows matching every filter. Returns `None` if a filter names an
    /// unknown tag column.
    pub fn filter_tags(&self, filters: &[TagFilter]) -> Option<Self> {
        if filters.is_empty() {
            return Some(self.clone());
        }

        let resolved: Vec<(usize, &TagFilter)> = filters
            .iter()
            .map(|f| self.tag_index(&f.tag).map(|idx| (idx, f)))
            .collect::<Option<_>>()?;

        let rows = self
            .rows
            .iter()
            .filter(|row| {
                resolved
                    .iter()
                    .all(|(idx, f)| row.tags.get(*idx).is_some_and(|t| f.matches(t)))
            })
            .cloned()
            .collect();
        Some(self.with_rows(rows))
    }

    /// Iterate `(row, value)` for one column, in date order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = (&Row, Option<f64>)> + '_ {
        self.rows.iter().map(move |r| (r, r.values.get(idx).copied().flatten()))
    }

    /// Present values of one column, in date order.
    pub fn present_values(&self, idx: usize) -> Vec<f64> {
        self.column(idx).filter_map(|(_, v)| v).collect()
    }

    /// Collapse rows sharing a date into their mean, skipping absent values.
    /// Dates where every value is absent are dropped.
    pub fn aggregate_by_date(&self, idx: usize) -> Vec<(NaiveDate, f64)> {
        let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for (row, value) in self.column(idx) {
            if let Some(v) = value {
                let entry = sums.entry(row.date).or_insert((0.0, 0));
                entry.0 += v;
                entry.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(date, (sum, n))| (date, sum / n as f64))
            .collect()
    }
}

fn position_ignore_case(names: &[String], name: &str) -> Option<usize> {
    let name = name.trim();
    names.iter().position(|c| c.eq_ignore_ascii_case(name))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    pub(crate) fn row(d: NaiveDate, values: &[Option<f64>], tags: &[&str]) -> Row {
        Row {
            date: d,
            label: d.format("%b").to_string(),
            values: values.to_vec(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn cpi_table() -> DatasetTable {
        DatasetTable::new(
            Indicator::Cpi,
            vec!["Inflation_Rate".to_string()],
            vec!["Region".to_string()],
            vec![
                row(date(2021, 2), &[Some(4.0)], &["Urban"]),
                row(date(2021, 1), &[Some(5.0)], &["Urban"]),
                row(date(2021, 1), &[Some(7.0)], &["Rural"]),
                row(date(2021, 2), &[None], &["Rural"]),
            ],
        )
    }

    #[test]
    fn new_sorts_by_date_and_keeps_duplicates() {
        let t = cpi_table();
        assert_eq!(t.len(), 4);
        assert_eq!(t.min_date(), Some(date(2021, 1)));
        assert_eq!(t.max_date(), Some(date(2021, 2)));
        assert_eq!(t.rows()[0].tags[0], "Urban");
        assert_eq!(t.rows()[1].tags[0], "Rural");
    }

    #[test]
    fn aggregate_by_date_means_duplicates_and_skips_absent() {
        let t = cpi_table();
        let agg = t.aggregate_by_date(0);
        assert_eq!(agg.len(), 2);
        assert_eq!(agg[0].0, date(2021, 1));
        assert!((agg[0].1 - 6.0).abs() < 1e-12);
        assert!((agg[1].1 - 4.0).abs() < 1e-12);
    }

    #[test]
    fn filter_tags_by_region() {
        let t = cpi_table();
        let rural = t.filter_tags(&[TagFilter::new("region", "RURAL")]).unwrap();
        assert_eq!(rural.len(), 2);
        assert_eq!(rural.present_values(0), vec![7.0]);
        assert!(t.filter_tags(&[TagFilter::new("State", "India")]).is_none());
    }

    #[test]
    fn column_lookup_is_case_insensitive() {
        let t = cpi_table();
        assert_eq!(t.column_index("inflation_rate"), Some(0));
        assert_eq!(t.column_index("CPI"), None);
    }
}
