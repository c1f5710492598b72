//! Cross-indicator correlation on a shared date axis.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use nalgebra::DMatrix;
use serde::Serialize;

use crate::domain::DatasetTable;
use crate::math::correlation_matrix;

/// One variable of a correlation request: a labelled, one-value-per-date series.
#[derive(Debug, Clone)]
pub struct DatedSeries {
    pub label: String,
    pub points: BTreeMap<NaiveDate, f64>,
}

impl DatedSeries {
    /// Collapse a table column to one mean value per date.
    pub fn from_table(label: impl Into<String>, table: &DatasetTable, column: usize) -> Self {
        Self {
            label: label.into(),
            points: table.aggregate_by_date(column).into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Symmetric, diagonal 1.0; `null` where a coefficient is undefined.
    /// Empty when the inputs share no dates.
    pub matrix: Vec<Vec<Option<f64>>>,
    /// Number of dates present in every input.
    pub observations: usize,
}

/// Inner-join the series on date and correlate every pair.
pub fn correlate(series: &[DatedSeries]) -> CorrelationMatrix {
    let labels: Vec<String> = series.iter().map(|s| s.label.clone()).collect();
    let dates = common_dates(series);

    if dates.is_empty() {
        return CorrelationMatrix {
            labels,
            matrix: Vec::new(),
            observations: 0,
        };
    }

    let dates: Vec<NaiveDate> = dates.into_iter().collect();
    let obs = DMatrix::from_fn(dates.len(), series.len(), |r, c| series[c].points[&dates[r]]);

    CorrelationMatrix {
        labels,
        matrix: correlation_matrix(&obs),
        observations: dates.len(),
    }
}

fn common_dates(series: &[DatedSeries]) -> BTreeSet<NaiveDate> {
    let mut iter = series.iter();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };
    let mut common: BTreeSet<NaiveDate> = first.points.keys().copied().collect();
    for s in iter {
        common.retain(|d| s.points.contains_key(d));
    }
    common
}
