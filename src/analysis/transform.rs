//! Derived series: trailing moving averages and period-over-period change.
//!
//! Both operate on a column in date order and keep its length, so the output
//! lines up with the input dates.

/// Trailing mean over `window` periods.
///
/// An entry is `None` until `window` periods are available, and whenever the
/// trailing window contains an absent value.
pub fn moving_average(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let sum = slice.iter().copied().sum::<Option<f64>>()?;
            Some(sum / window as f64)
        })
        .collect()
}

/// Percentage change from the previous period.
///
/// `None` for the first entry, and where either side is absent or the previous
/// value is 0.
pub fn period_change_pct(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for v in values {
        let change = match (prev, *v) {
            (Some(p), Some(c)) if p != 0.0 => Some((c - p) / p * 100.0),
            _ => None,
        };
        out.push(change);
        prev = *v;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_average_waits_for_a_full_window() {
        let v = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        assert_eq!(moving_average(&v, 2), vec![None, Some(1.5), Some(2.5), Some(3.5)]);
        assert_eq!(moving_average(&v, 4), vec![None, None, None, Some(2.5)]);
        assert_eq!(moving_average(&v, 5), vec![None; 4]);
    }

    #[test]
    fn moving_average_propagates_gaps() {
        let v = [Some(1.0), None, Some(3.0), Some(5.0)];
        assert_eq!(moving_average(&v, 2), vec![None, None, None, Some(4.0)]);
    }

    #[test]
    fn period_change() {
        let v = [Some(100.0), Some(110.0), None, Some(50.0), Some(0.0), Some(10.0)];
        let c = period_change_pct(&v);
        assert_eq!(c[0], None);
        assert!((c[1].unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(c[2], None);
        assert_eq!(c[3], None);
        assert!((c[4].unwrap() + 100.0).abs() < 1e-12);
        assert_eq!(c[5], None);
    }
}
