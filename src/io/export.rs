//! Export the merged monthly table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::ChartPoint;
use crate::error::AppError;

/// Write the observed + projected months to a CSV file.
pub fn write_table_csv(path: &Path, points: &[ChartPoint]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::config(format!(
            "Failed to create export CSV '{}': {e}",
            path.display()
        ))
    })?;

    // Header
    writeln!(file, "label,buy,sell,source")
        .map_err(|e| AppError::config(format!("Failed to write export CSV header: {e}")))?;

    for p in points {
        let source = if p.observed { "observed" } else { "projected" };
        writeln!(file, "{},{:.4},{:.4},{}", p.label, p.buy, p.sell, source)
            .map_err(|e| AppError::config(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
