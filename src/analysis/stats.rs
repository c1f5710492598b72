//! Descriptive statistics over one numeric column.
//!
//! Absent values are skipped, never read as zero. The computed values keep full
//! precision; `SeriesStats::rounded` produces the 2-decimal display copy.

use serde::Serialize;

use crate::domain::DatasetTable;

/// `Default` is the result for a column with no present values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeriesStats {
    /// Chronologically last present value.
    pub latest: f64,
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
    pub median: f64,
    /// `latest - first`; 0 with fewer than two values.
    pub change: f64,
    /// `(latest - first) / first * 100`; absent with fewer than two values or
    /// when the first value is 0.
    pub growth_rate: Option<f64>,
    /// Sample standard deviation; absent with fewer than two values.
    pub std_dev: Option<f64>,
    pub count: usize,
}

impl SeriesStats {
    pub fn rounded(&self) -> Self {
        Self {
            latest: round2(self.latest),
            highest: round2(self.highest),
            lowest: round2(self.lowest),
            average: round2(self.average),
            median: round2(self.median),
            change: round2(self.change),
            growth_rate: self.growth_rate.map(round2),
            std_dev: self.std_dev.map(round2),
            count: self.count,
        }
    }
}

/// Statistics over present values given in chronological order.
pub fn compute_stats(values: &[f64]) -> SeriesStats {
    let (Some(&first), Some(&latest)) = (values.first(), values.last()) else {
        return SeriesStats::default();
    };

    let n = values.len();
    let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
    let average = values.iter().sum::<f64>() / n as f64;

    let (change, growth_rate, std_dev) = if n >= 2 {
        let change = latest - first;
        let growth = (first != 0.0).then(|| change / first * 100.0);
        let variance = values.iter().map(|v| (v - average).powi(2)).sum::<f64>() / (n as f64 - 1.0);
        (change, growth, Some(variance.sqrt()))
    } else {
        (0.0, None, None)
    };

    SeriesStats {
        latest,
        highest,
        lowest,
        average,
        median: median(values),
        change,
        growth_rate,
        std_dev,
        count: n,
    }
}

/// Statistics for one column of a table.
pub fn column_stats(table: &DatasetTable, column: usize) -> SeriesStats {
    compute_stats(&table.present_values(column))
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Indicator;
    use crate::domain::table::tests::{date, row};

    #[test]
    fn growth_and_change() {
        let s = compute_stats(&[100.0, 100.0, 150.0]);
        assert_eq!(s.change, 50.0);
        assert_eq!(s.growth_rate, Some(50.0));
        assert_eq!(s.latest, 150.0);
        assert_eq!(s.highest, 150.0);
        assert_eq!(s.lowest, 100.0);
        assert!((s.average - 350.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.median, 100.0);
        assert_eq!(s.count, 3);
    }

    #[test]
    fn growth_is_absent_when_first_value_is_zero() {
        let s = compute_stats(&[0.0, 5.0, 10.0]);
        assert_eq!(s.change, 10.0);
        assert_eq!(s.growth_rate, None);
    }

    #[test]
    fn single_value_has_no_change() {
        let s = compute_stats(&[3.5]);
        assert_eq!(s.latest, 3.5);
        assert_eq!(s.change, 0.0);
        assert_eq!(s.growth_rate, None);
        assert_eq!(s.std_dev, None);
    }

    #[test]
    fn all_absent_column_yields_zero_defaults() {
        let t = DatasetTable::new(
            Indicator::Iip,
            vec!["IIP_YOY_Growth".into()],
            vec![],
            vec![row(date(2021, 1), &[None], &[]), row(date(2021, 2), &[None], &[])],
        );
        let s = column_stats(&t, 0);
        assert_eq!(s, SeriesStats::default());
        assert_eq!(s.latest, 0.0);
        assert_eq!(s.average, 0.0);
        assert_eq!(s.count, 0);
    }

    #[test]
    fn absent_values_are_skipped_not_zeroed() {
        let t = DatasetTable::new(
            Indicator::Iip,
            vec!["IIP_YOY_Growth".into()],
            vec![],
            vec![
                row(date(2021, 1), &[Some(2.0)], &[]),
                row(date(2021, 2), &[None], &[]),
                row(date(2021, 3), &[Some(4.0)], &[]),
                row(date(2021, 4), &[None], &[]),
            ],
        );
        let s = column_stats(&t, 0);
        assert_eq!(s.latest, 4.0);
        assert_eq!(s.lowest, 2.0);
        assert_eq!(s.average, 3.0);
        assert_eq!(s.growth_rate, Some(100.0));
    }

    #[test]
    fn rounding_is_display_only() {
        let s = compute_stats(&[3.0, 1.0, 1.0]);
        let r = s.rounded();
        assert!((s.average - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(r.average, 1.67);
        assert_eq!(r.growth_rate, Some(-66.67));
    }
}
