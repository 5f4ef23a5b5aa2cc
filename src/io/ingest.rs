//! CSV ingest and normalization.
//!
//! Turns a raw exchange-rate export into `RateRow`s that are safe to hand to
//! the resampler.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level tolerance** (skip bad rows, but count what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no resampling or fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::RateRow;
use crate::error::AppError;

/// Accepted header spellings, checked in order after lowercasing.
///
/// Central-bank exports in the wild carry Spanish headers; locally produced
/// files use the English ones.
const DATE_COLUMNS: [&str; 2] = ["date", "fecha"];
const BUY_COLUMNS: [&str; 2] = ["buy", "compra"];
const SELL_COLUMNS: [&str; 2] = ["sell", "venta"];

/// Row accounting for the ingest step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: usize,
    /// Records skipped because the date cell (or the record itself) would not parse.
    pub unparsable_dates: usize,
    /// Rows dropped because their date falls on or before the cutoff.
    pub before_cutoff: usize,
    pub rows_kept: usize,
}

/// Ingest output: the surviving rows plus the per-row accounting.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub rows: Vec<RateRow>,
    pub stats: IngestStats,
}

/// Load the rate CSV, keeping rows dated strictly after `cutoff`.
///
/// Numeric cells that are blank or unparsable become `None` on the row; the
/// resampler decides what to do with them. Rows whose date cannot be parsed
/// are skipped and counted.
pub fn load_rate_rows(path: &Path, cutoff: NaiveDate) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::config(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::config(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let date_idx = find_column(&header_map, &DATE_COLUMNS)
        .ok_or_else(|| missing_column_error("date", &DATE_COLUMNS))?;
    let buy_idx = find_column(&header_map, &BUY_COLUMNS)
        .ok_or_else(|| missing_column_error("buy", &BUY_COLUMNS))?;
    let sell_idx = find_column(&header_map, &SELL_COLUMNS)
        .ok_or_else(|| missing_column_error("sell", &SELL_COLUMNS))?;

    let mut stats = IngestStats::default();
    let mut rows = Vec::new();

    for result in reader.records() {
        stats.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(_) => {
                stats.unparsable_dates += 1;
                continue;
            }
        };

        let Some(date) = get_cell(&record, date_idx).and_then(|s| parse_date(s).ok()) else {
            stats.unparsable_dates += 1;
            continue;
        };

        // Strictly after the cutoff; the cutoff day itself is excluded.
        if date <= cutoff {
            stats.before_cutoff += 1;
            continue;
        }

        rows.push(RateRow {
            date,
            buy: parse_opt_f64(get_cell(&record, buy_idx)),
            sell: parse_opt_f64(get_cell(&record, sell_idx)),
        });
    }

    stats.rows_kept = rows.len();
    if rows.is_empty() {
        return Err(AppError::no_data(format!(
            "No rows dated after {} in '{}'.",
            cutoff.format("%Y-%m-%d"),
            path.display()
        )));
    }

    Ok(IngestedData { rows, stats })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿fecha"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|name| header_map.get(*name).copied())
}

fn missing_column_error(role: &str, aliases: &[&str]) -> AppError {
    AppError::config(format!(
        "Missing required {role} column (accepted headers: {}).",
        aliases.join(", ")
    ))
}

fn get_cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Day-first formats come first: the upstream export writes `DD/MM/YYYY`,
    // and an ambiguous cell like `05/08/2023` must read as 5 August.
    const FMTS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: DD/MM/YYYY, DD-MM-YYYY, YYYY-MM-DD, YYYY/MM/DD."
    ))
}

fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let v = s?.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 8, 1).unwrap()
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn day_first_dates_and_spanish_headers_are_accepted() {
        let file = write_csv("FECHA,COMPRA,VENTA\n05/08/2023,500.12,507.34\n");
        let data = load_rate_rows(file.path(), cutoff()).unwrap();

        assert_eq!(data.rows.len(), 1);
        let row = &data.rows[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2023, 8, 5).unwrap());
        assert_eq!(row.buy, Some(500.12));
        assert_eq!(row.sell, Some(507.34));
    }

    #[test]
    fn english_headers_and_iso_dates_work_too() {
        let file = write_csv("date,buy,sell\n2023-08-05,500.0,507.0\n");
        let data = load_rate_rows(file.path(), cutoff()).unwrap();
        assert_eq!(data.rows.len(), 1);
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let file = write_csv("\u{feff}fecha,compra,venta\n05/08/2023,500.0,507.0\n");
        let data = load_rate_rows(file.path(), cutoff()).unwrap();
        assert_eq!(data.rows.len(), 1);
    }

    #[test]
    fn cutoff_day_itself_is_excluded() {
        let file = write_csv(
            "fecha,compra,venta\n\
             01/08/2023,499.0,506.0\n\
             02/08/2023,500.0,507.0\n",
        );
        let data = load_rate_rows(file.path(), cutoff()).unwrap();

        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.rows[0].date, NaiveDate::from_ymd_opt(2023, 8, 2).unwrap());
        assert_eq!(data.stats.before_cutoff, 1);
    }

    #[test]
    fn unparsable_dates_are_skipped_and_counted() {
        let file = write_csv(
            "fecha,compra,venta\n\
             not-a-date,500.0,507.0\n\
             05/08/2023,501.0,508.0\n",
        );
        let data = load_rate_rows(file.path(), cutoff()).unwrap();

        assert_eq!(data.rows.len(), 1);
        assert_eq!(data.stats.unparsable_dates, 1);
        assert_eq!(data.stats.rows_read, 2);
    }

    #[test]
    fn blank_and_garbage_numerics_become_none() {
        let file = write_csv(
            "fecha,compra,venta\n\
             05/08/2023,,507.0\n\
             06/08/2023,n/a,508.0\n",
        );
        let data = load_rate_rows(file.path(), cutoff()).unwrap();

        assert_eq!(data.rows[0].buy, None);
        assert_eq!(data.rows[0].sell, Some(507.0));
        assert_eq!(data.rows[1].buy, None);
    }

    #[test]
    fn missing_sell_column_is_a_config_error() {
        let file = write_csv("fecha,compra\n05/08/2023,500.0\n");
        let err = load_rate_rows(file.path(), cutoff()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn everything_before_cutoff_is_a_no_data_error() {
        let file = write_csv("fecha,compra,venta\n01/07/2023,500.0,507.0\n");
        let err = load_rate_rows(file.path(), cutoff()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
