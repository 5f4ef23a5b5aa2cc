//! Write trend JSON files.
//!
//! Trend JSON is the "portable" representation of a run:
//! - the fitted line for each series (slope + intercept)
//! - the projected month labels and levels
//! - run metadata (cutoff, forecast window)
//!
//! The schema is defined by `domain::TrendFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::TrendFile;
use crate::error::AppError;

/// Write a trend JSON file.
pub fn write_trend_json(path: &Path, trend: &TrendFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!(
            "Failed to create trend JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, trend)
        .map_err(|e| AppError::config(format!("Failed to write trend JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectedPoint, TrendLine, TrendSeries};
    use chrono::NaiveDate;

    #[test]
    fn written_file_reads_back_with_the_same_fits() {
        let trend = TrendFile {
            tool: "fxt".to_string(),
            cutoff: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
            forecast_start: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            forecast_end: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
            buy: TrendSeries {
                fit: TrendLine {
                    slope: 0.5,
                    intercept: 500.0,
                },
                points: vec![ProjectedPoint {
                    label: "August-2024".into(),
                    value: 500.5,
                }],
            },
            sell: TrendSeries {
                fit: TrendLine {
                    slope: 0.4,
                    intercept: 507.0,
                },
                points: vec![],
            },
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trend.json");
        write_trend_json(&path, &trend).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let read: TrendFile = serde_json::from_reader(file).unwrap();
        assert_eq!(read.tool, "fxt");
        assert!((read.buy.fit.slope - 0.5).abs() < 1e-12);
        assert_eq!(read.buy.points.len(), 1);
        assert_eq!(read.cutoff, trend.cutoff);
    }
}
