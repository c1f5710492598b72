//! Plain-text rendering of query responses.
//!
//! We keep formatting code in one place so:
//! - the service and analysis code stays presentation-free
//! - output changes are localized

use crate::analysis::{CorrelationMatrix, SeriesStats};
use crate::app::service::{IndicatorInfo, SeriesResponse, StatisticsResponse, SummaryEntry};

/// Format the indicator catalog.
pub fn format_indicators(list: &[IndicatorInfo]) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("{:<20} {:<28} {:<12} {:<12} {:<6}", "id", "name", "category", "unit", "loaded"));
    push_line(&mut out, format!("{:-<20} {:-<28} {:-<12} {:-<12} {:-<6}", "", "", "", "", ""));
    for i in list {
        push_line(
            &mut out,
            format!(
                "{:<20} {:<28} {:<12} {:<12} {:<6}",
                i.id,
                truncate(i.name, 28),
                i.category,
                truncate(i.unit, 12),
                if i.loaded { "yes" } else { "no" },
            ),
        );
    }
    out
}

/// Format a series: one line per observation followed by its statistics.
pub fn format_series(series: &SeriesResponse) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} / {} ===\n", series.indicator, series.column));

    let with_ma = series.moving_average.is_some();
    let mut header = format!("{:<12} {:<10} {:>14} {:>10}", "date", "period", "value", "chg%");
    if with_ma {
        header.push_str(&format!(" {:>14}", "mov.avg"));
    }
    push_line(&mut out, header);

    for (i, (date, value)) in series.dates.iter().zip(&series.values).enumerate() {
        let mut line = format!(
            "{:<12} {:<10} {:>14.2} {:>10}",
            date.to_string(),
            truncate(&series.labels[i], 10),
            value,
            fmt_opt(series.change_pct.get(i).copied().flatten()),
        );
        if let Some(ma) = &series.moving_average {
            line.push_str(&format!(" {:>14}", fmt_opt(ma.get(i).copied().flatten())));
        }
        push_line(&mut out, line);
    }

    if series.values.is_empty() {
        out.push_str("(no observations)\n");
    }
    out.push('\n');
    out.push_str(&format_stats_block(&series.stats));
    out
}

/// Format a statistics response.
pub fn format_statistics(stats: &StatisticsResponse) -> String {
    let mut out = format!("=== {} / {} ===\n", stats.indicator, stats.column);
    out.push_str(&format_stats_block(&stats.stats));
    out
}

/// Format a correlation matrix as a labelled grid.
pub fn format_correlation(m: &CorrelationMatrix) -> String {
    let mut out = String::new();
    if m.matrix.is_empty() {
        out.push_str(&format!(
            "No common dates across: {}\n",
            m.labels.join(", ")
        ));
        return out;
    }

    out.push_str(&format!("Correlation over {} common dates\n", m.observations));
    for (i, label) in m.labels.iter().enumerate() {
        out.push_str(&format!("  [{i}] {label}\n"));
    }

    let mut header = format!("{:<5}", "");
    for i in 0..m.labels.len() {
        header.push_str(&format!(" {:>7}", format!("[{i}]")));
    }
    push_line(&mut out, header);

    for (i, row) in m.matrix.iter().enumerate() {
        let mut line = format!("{:<5}", format!("[{i}]"));
        for r in row {
            line.push_str(&format!(" {:>7}", r.map(|r| format!("{r:.3}")).unwrap_or_else(|| "-".to_string())));
        }
        push_line(&mut out, line);
    }
    out
}

/// Format the per-indicator summary table.
pub fn format_summary(entries: &[SummaryEntry]) -> String {
    let mut out = String::new();
    push_line(&mut out, format!("{:<20} {:<28} {:>14} {:>12} {:>10}", "id", "name", "latest", "change", "growth%"));
    push_line(&mut out, format!("{:-<20} {:-<28} {:-<14} {:-<12} {:-<10}", "", "", "", "", ""));
    for e in entries {
        push_line(
            &mut out,
            format!(
                "{:<20} {:<28} {:>14.2} {:>12.2} {:>10}",
                e.id,
                truncate(e.name, 28),
                e.latest,
                e.change,
                fmt_opt(e.growth_rate),
            ),
        );
    }
    out
}

fn format_stats_block(s: &SeriesStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("n={}\n", s.count));
    out.push_str(&format!("latest : {:.2}\n", s.latest));
    out.push_str(&format!("highest: {:.2}\n", s.highest));
    out.push_str(&format!("lowest : {:.2}\n", s.lowest));
    out.push_str(&format!("average: {:.2}\n", s.average));
    out.push_str(&format!("median : {:.2}\n", s.median));
    out.push_str(&format!("std dev: {}\n", fmt_opt(s.std_dev)));
    out.push_str(&format!("change : {:.2}\n", s.change));
    out.push_str(&format!("growth : {}\n", s.growth_rate.map(|g| format!("{g:.2}%")).unwrap_or_else(|| "-".to_string())));
    out
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_stats;
    use crate::domain::Indicator;

    #[test]
    fn truncate_marks_cut_strings() {
        assert_eq!(truncate("Repo Rate", 12), "Repo Rate");
        assert_eq!(truncate("Composite Leading Indicator", 10), "Composite.");
    }

    #[test]
    fn correlation_grid_shows_undefined_as_dash() {
        let m = CorrelationMatrix {
            labels: vec!["a".into(), "b".into()],
            matrix: vec![vec![Some(1.0), None], vec![None, Some(1.0)]],
            observations: 1,
        };
        let text = format_correlation(&m);
        assert!(text.contains("Correlation over 1 common dates"));
        assert!(text.contains("[0]     1.000       -"));
    }

    #[test]
    fn empty_correlation_is_reported() {
        let m = CorrelationMatrix {
            labels: vec!["a".into(), "b".into()],
            matrix: Vec::new(),
            observations: 0,
        };
        assert_eq!(format_correlation(&m), "No common dates across: a, b\n");
    }

    #[test]
    fn statistics_block_includes_growth() {
        let stats = StatisticsResponse {
            indicator: Indicator::Gdp,
            column: "GDP_Growth_Percent".into(),
            stats: compute_stats(&[100.0, 100.0, 150.0]).rounded(),
        };
        let text = format_statistics(&stats);
        assert!(text.starts_with("=== gdp / GDP_Growth_Percent ===\n"));
        assert!(text.contains("change : 50.00\n"));
        assert!(text.contains("growth : 50.00%\n"));
    }
}
