//! Query service shared by every front-end.
//!
//! Each call borrows the read-only `IndicatorStore`, builds a request-scoped
//! view (tag filters → date range → window anchored at the indicator's latest
//! date), and computes the response. Only unknown indicators, columns, or tags
//! fail; empty results are valid.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::{
    CorrelationMatrix, DatedSeries, SeriesStats, column_stats, compute_stats, correlate, filter_date_range,
    filter_window_from, moving_average, period_change_pct,
};
use crate::data::IndicatorStore;
use crate::domain::{DatasetTable, Indicator, TagFilter, Window};
use crate::error::AppError;

/// Indicator metadata as listed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub unit: &'static str,
    pub columns: &'static [&'static str],
    pub tags: &'static [&'static str],
    pub loaded: bool,
}

/// Options for `get_series`.
#[derive(Debug, Clone)]
pub struct SeriesQuery {
    /// Numeric column; defaults to the indicator's primary column.
    pub column: Option<String>,
    pub window: Window,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub filters: Vec<TagFilter>,
    /// Trailing moving-average length in periods.
    pub moving_average: Option<usize>,
}

impl Default for SeriesQuery {
    fn default() -> Self {
        Self {
            column: None,
            window: Window::All,
            start: None,
            end: None,
            filters: Vec::new(),
            moving_average: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesResponse {
    pub indicator: Indicator,
    pub column: String,
    /// Raw period labels from the source rows.
    pub labels: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
    /// Period-over-period change in percent, aligned with `values`.
    pub change_pct: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<Vec<Option<f64>>>,
    pub stats: SeriesStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub indicator: Indicator,
    pub column: String,
    #[serde(flatten)]
    pub stats: SeriesStats,
}

/// One variable of a correlation request: `indicator[:column][@Tag=Value,...]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationInput {
    pub indicator: Indicator,
    pub column: Option<String>,
    pub filters: Vec<TagFilter>,
}

impl CorrelationInput {
    pub fn new(indicator: Indicator, column: Option<&str>, filters: Vec<TagFilter>) -> Self {
        Self {
            indicator,
            column: column.map(str::to_string),
            filters,
        }
    }
}

impl FromStr for CorrelationInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, filters) = match s.split_once('@') {
            Some((head, filters)) => (head, Some(filters)),
            None => (s, None),
        };
        let (key, column) = match head.split_once(':') {
            Some((key, column)) => (key, Some(column.trim()).filter(|c| !c.is_empty())),
            None => (head, None),
        };
        let indicator = Indicator::from_key(key).ok_or_else(|| format!("Unknown indicator '{}'.", key.trim()))?;
        let filters = filters
            .map(|f| f.split(',').map(TagFilter::from_str).collect::<Result<Vec<_>, _>>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self::new(indicator, column, filters))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub column: &'static str,
    pub latest: f64,
    pub change: f64,
    pub growth_rate: Option<f64>,
}

/// Metadata for every indicator in the catalog.
pub fn list_indicators(store: &IndicatorStore) -> Vec<IndicatorInfo> {
    Indicator::ALL
        .into_iter()
        .map(|indicator| {
            let spec = indicator.spec();
            IndicatorInfo {
                id: spec.key,
                name: spec.name,
                description: spec.description,
                category: spec.category,
                unit: spec.unit,
                columns: spec.value_columns,
                tags: spec.tag_columns,
                loaded: store.is_loaded(indicator),
            }
        })
        .collect()
}

/// Filtered series for one indicator column, with statistics over the same rows.
pub fn get_series(store: &IndicatorStore, key: &str, query: &SeriesQuery) -> Result<SeriesResponse, AppError> {
    let table = store.table_by_key(key)?;
    let column = resolve_column(table, query.column.as_deref())?;
    if query.moving_average == Some(0) {
        return Err(AppError::input("Moving-average window must be at least 1."));
    }

    // The window ends at the indicator's own latest date, not the filtered view's.
    let view = apply_filters(table, &query.filters)?;
    let view = filter_date_range(&view, query.start, query.end);
    let view = filter_window_from(&view, query.window, table.max_date());

    // Derived series see the gaps; the response then keeps present rows only.
    let raw: Vec<Option<f64>> = view.column(column).map(|(_, v)| v).collect();
    let change_pct = period_change_pct(&raw);
    let averaged = query.moving_average.map(|w| moving_average(&raw, w));

    let mut labels = Vec::new();
    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut kept_change = Vec::new();
    let mut kept_average = averaged.as_ref().map(|_| Vec::new());
    for (i, (row, value)) in view.column(column).enumerate() {
        let Some(v) = value else { continue };
        labels.push(row.label.clone());
        dates.push(row.date);
        values.push(v);
        kept_change.push(change_pct[i]);
        if let (Some(kept), Some(all)) = (kept_average.as_mut(), averaged.as_ref()) {
            kept.push(all[i]);
        }
    }

    let stats = compute_stats(&values).rounded();

    Ok(SeriesResponse {
        indicator: table.indicator,
        column: table.columns[column].clone(),
        labels,
        dates,
        values,
        change_pct: kept_change,
        moving_average: kept_average,
        stats,
    })
}

/// Rounded statistics over a whole (unfiltered) indicator column.
pub fn get_statistics(store: &IndicatorStore, key: &str, column: Option<&str>) -> Result<StatisticsResponse, AppError> {
    let table = store.table_by_key(key)?;
    let idx = resolve_column(table, column)?;
    Ok(StatisticsResponse {
        indicator: table.indicator,
        column: table.columns[idx].clone(),
        stats: column_stats(table, idx).rounded(),
    })
}

/// Correlation matrix across the requested indicator columns.
pub fn get_correlation(store: &IndicatorStore, inputs: &[CorrelationInput]) -> Result<CorrelationMatrix, AppError> {
    let series = inputs
        .iter()
        .map(|input| {
            let table = store.table(input.indicator)?;
            let idx = resolve_column(table, input.column.as_deref())?;
            let view = apply_filters(table, &input.filters)?;
            Ok(DatedSeries::from_table(correlation_label(&view, idx, &input.filters), &view, idx))
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(correlate(&series))
}

/// The indicator set used when a correlation request names none: headline
/// growth, inflation, national unemployment, reserves, production, and policy rate.
pub fn default_correlation_inputs() -> Vec<CorrelationInput> {
    vec![
        CorrelationInput::new(Indicator::Gdp, None, Vec::new()),
        CorrelationInput::new(Indicator::Cpi, Some("Inflation_Rate"), Vec::new()),
        CorrelationInput::new(Indicator::Unemployment, None, vec![TagFilter::new("State", "India")]),
        CorrelationInput::new(Indicator::Forex, None, Vec::new()),
        CorrelationInput::new(Indicator::Iip, None, Vec::new()),
        CorrelationInput::new(Indicator::RepoRate, None, Vec::new()),
    ]
}

/// Latest value, change, and growth of each loaded indicator's primary column.
pub fn summary(store: &IndicatorStore) -> Vec<SummaryEntry> {
    store
        .tables()
        .map(|table| {
            let spec = table.indicator.spec();
            let stats = table
                .column_index(spec.primary_column())
                .map(|idx| column_stats(table, idx).rounded())
                .unwrap_or_default();
            SummaryEntry {
                id: spec.key,
                name: spec.name,
                column: spec.primary_column(),
                latest: stats.latest,
                change: stats.change,
                growth_rate: stats.growth_rate,
            }
        })
        .collect()
}

fn resolve_column(table: &DatasetTable, column: Option<&str>) -> Result<usize, AppError> {
    let name = column.unwrap_or_else(|| table.indicator.spec().primary_column());
    table.column_index(name).ok_or_else(|| {
        AppError::not_found(format!(
            "Unknown column '{name}' for indicator '{}'. Available: {}.",
            table.indicator,
            table.columns.join(", ")
        ))
    })
}

fn apply_filters(table: &DatasetTable, filters: &[TagFilter]) -> Result<DatasetTable, AppError> {
    table.filter_tags(filters).ok_or_else(|| {
        let tags = if table.tag_columns.is_empty() {
            "none".to_string()
        } else {
            table.tag_columns.join(", ")
        };
        AppError::not_found(format!(
            "Unknown tag filter for indicator '{}'. Available tags: {tags}.",
            table.indicator
        ))
    })
}

fn correlation_label(table: &DatasetTable, column: usize, filters: &[TagFilter]) -> String {
    let name = &table.columns[column];
    if filters.is_empty() {
        return name.clone();
    }
    let filters: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
    format!("{name} [{}]", filters.join(", "))
}
