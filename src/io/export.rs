//! Export a computed series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::app::service::SeriesResponse;
use crate::error::AppError;

/// Write a series as `date,label,value[,change_pct][,moving_average]`.
pub fn write_series_csv(path: &Path, series: &SeriesResponse) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::output(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut header = vec!["date", "label", series.column.as_str(), "change_pct"];
    if series.moving_average.is_some() {
        header.push("moving_average");
    }
    writer
        .write_record(&header)
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;

    for (i, (date, value)) in series.dates.iter().zip(&series.values).enumerate() {
        let mut record = vec![
            date.to_string(),
            series.labels[i].clone(),
            value.to_string(),
            fmt_opt(series.change_pct.get(i).copied().flatten()),
        ];
        if let Some(ma) = &series.moving_average {
            record.push(fmt_opt(ma.get(i).copied().flatten()));
        }
        writer
            .write_record(&record)
            .map_err(|e| AppError::output(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.4}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::analysis::compute_stats;
    use crate::domain::Indicator;

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gst.csv");
        let values = vec![100.0, 110.0];
        let series = SeriesResponse {
            indicator: Indicator::Gst,
            column: "GST_Collections_Cr".to_string(),
            labels: vec!["Jan".to_string(), "Feb".to_string()],
            dates: vec![
                NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
            ],
            change_pct: vec![None, Some(10.0)],
            moving_average: Some(vec![None, Some(105.0)]),
            stats: compute_stats(&values),
            values,
        };

        write_series_csv(&path, &series).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,label,GST_Collections_Cr,change_pct,moving_average");
        assert_eq!(lines[1], "2021-01-01,Jan,100,,");
        assert_eq!(lines[2], "2021-02-01,Feb,110,10.0000,105.0000");
    }
}
