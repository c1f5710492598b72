//! Range filters: trailing windows and explicit date bounds.

use chrono::{Duration, NaiveDate};

use crate::domain::{DatasetTable, Window};

/// Keep rows within `[max_date - window, max_date]`, where `max_date` is the
/// table's own latest date. `Window::All` and empty tables pass through.
pub fn filter_window(table: &DatasetTable, window: Window) -> DatasetTable {
    filter_window_from(table, window, table.max_date())
}

/// Keep rows within `[anchor - window, anchor]`.
///
/// Used when `table` is a filtered view and the window must still end at the
/// full indicator table's latest date. A `None` anchor passes through.
pub fn filter_window_from(table: &DatasetTable, window: Window, anchor: Option<NaiveDate>) -> DatasetTable {
    let (Some(days), Some(end)) = (window.lookback_days(), anchor) else {
        return table.clone();
    };
    let start = end - Duration::days(days);
    filter_date_range(table, Some(start), Some(end))
}

/// Keep rows with `start <= date <= end`. Either bound may be open.
pub fn filter_date_range(table: &DatasetTable, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DatasetTable {
    if start.is_none() && end.is_none() {
        return table.clone();
    }
    let rows = table
        .rows()
        .iter()
        .filter(|r| start.is_none_or(|s| r.date >= s) && end.is_none_or(|e| r.date <= e))
        .cloned()
        .collect();
    table.with_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Indicator;
    use crate::domain::table::tests::{date, row};

    fn monthly(from_year: i32, months: u32) -> DatasetTable {
        let rows = (0..months)
            .map(|i| {
                let y = from_year + (i / 12) as i32;
                let m = i % 12 + 1;
                row(date(y, m), &[Some(i as f64)], &[])
            })
            .collect();
        DatasetTable::new(Indicator::Gst, vec!["GST_Collections_Cr".into()], vec![], rows)
    }

    #[test]
    fn one_year_window_is_relative_to_table_max_and_inclusive() {
        // 2018-01 .. 2021-12
        let t = monthly(2018, 48);
        let w = filter_window(&t, Window::OneYear);
        // 2020-12-01 is exactly 365 days before 2021-12-01.
        assert_eq!(w.min_date(), Some(date(2020, 12)));
        assert_eq!(w.max_date(), Some(date(2021, 12)));
        assert_eq!(w.len(), 13);
    }

    #[test]
    fn three_month_window() {
        let t = monthly(2021, 12);
        let w = filter_window(&t, Window::ThreeMonths);
        // 90 days before 2021-12-01 is 2021-09-02.
        assert_eq!(w.min_date(), Some(date(2021, 10)));
        assert_eq!(w.len(), 3);
    }

    #[test]
    fn all_and_empty_pass_through() {
        let t = monthly(2018, 48);
        assert_eq!(filter_window(&t, Window::All), t);

        let empty = t.with_rows(Vec::new());
        assert!(filter_window(&empty, Window::TwoYears).is_empty());
    }

    #[test]
    fn refiltering_to_same_or_wider_window_is_idempotent() {
        let t = monthly(2010, 150);
        let once = filter_window(&t, Window::TwoYears);
        assert_eq!(filter_window(&once, Window::TwoYears), once);
        assert_eq!(filter_window(&once, Window::FiveYears), once);
        assert_eq!(filter_window(&once, Window::All), once);
    }

    #[test]
    fn anchored_window_ignores_the_view_latest_date() {
        let t = monthly(2021, 12);
        let early = filter_date_range(&t, None, Some(date(2021, 6)));
        // The view ends in June, but the window still ends at the table's December.
        assert!(filter_window_from(&early, Window::ThreeMonths, t.max_date()).is_empty());
        assert_eq!(filter_window_from(&early, Window::OneYear, t.max_date()).len(), 6);
        assert_eq!(filter_window_from(&early, Window::ThreeMonths, None), early);
    }

    #[test]
    fn explicit_date_range() {
        let t = monthly(2020, 24);
        let r = filter_date_range(&t, Some(date(2020, 6)), None);
        assert_eq!(r.min_date(), Some(date(2020, 6)));
        assert_eq!(r.len(), 19);
        let r = filter_date_range(&t, None, Some(date(2020, 2)));
        assert_eq!(r.len(), 2);
    }
}
