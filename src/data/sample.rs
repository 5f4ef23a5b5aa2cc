//! Synthetic exchange-rate CSV generation.
//!
//! Produces a file shaped like the real upstream export: day-first dates,
//! a buy column, a sell column, occasional missing days (weekends, holidays)
//! and occasional blank cells. The walk is seeded so the same settings always
//! write byte-identical output.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::error::AppError;

/// Settings for one generated file.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out: PathBuf,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub seed: u64,
    /// Buy level on the first day; the walk starts here.
    pub start_level: f64,
    /// Mean daily change of the buy level.
    pub drift: f64,
    /// Std dev of the daily change.
    pub vol: f64,
    /// Constant sell premium over buy.
    pub spread: f64,
    /// Chance that a day gets no row at all.
    pub gap_prob: f64,
    /// Chance that an emitted cell is left blank.
    pub blank_prob: f64,
}

/// Generate the CSV. Returns the number of data rows written.
pub fn write_sample_csv(config: &SampleConfig) -> Result<usize, AppError> {
    if config.end < config.start {
        return Err(AppError::config(format!(
            "Sample range is empty: end {} is before start {}.",
            config.end, config.start
        )));
    }
    if !(config.start_level.is_finite() && config.start_level > 0.0) {
        return Err(AppError::config("Start level must be finite and > 0."));
    }
    if !(config.vol.is_finite() && config.vol >= 0.0 && config.spread.is_finite() && config.spread >= 0.0) {
        return Err(AppError::config("Volatility and spread must be finite and >= 0."));
    }
    if !(0.0..1.0).contains(&config.gap_prob) || !(0.0..1.0).contains(&config.blank_prob) {
        return Err(AppError::config(
            "Gap/blank probabilities must be in [0, 1).",
        ));
    }

    if let Some(parent) = config.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config(format!(
                    "Failed to create output directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }
    }
    let mut file = File::create(&config.out).map_err(|e| {
        AppError::config(format!(
            "Failed to create sample CSV '{}': {e}",
            config.out.display()
        ))
    })?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(config.drift, config.vol)
        .map_err(|e| AppError::compute(format!("Noise distribution error: {e}")))?;

    writeln!(file, "date,buy,sell")
        .map_err(|e| AppError::config(format!("Failed to write sample CSV: {e}")))?;

    let mut level = config.start_level;
    let mut rows = 0usize;
    let days = (config.end - config.start).num_days();
    for offset in 0..=days {
        let date = config
            .start
            .checked_add_signed(Duration::days(offset))
            .ok_or_else(|| AppError::compute("Calendar overflow while generating sample."))?;

        // The walk advances every calendar day, even when the row is skipped,
        // so gap days look like real market closures rather than flat spots.
        level += normal.sample(&mut rng);

        let roll: f64 = rng.r#gen();
        if roll < config.gap_prob {
            continue;
        }

        let buy = format_cell(&mut rng, config.blank_prob, level);
        let sell = format_cell(&mut rng, config.blank_prob, level + config.spread);
        writeln!(file, "{},{buy},{sell}", date.format("%d/%m/%Y"))
            .map_err(|e| AppError::config(format!("Failed to write sample CSV: {e}")))?;
        rows += 1;
    }

    Ok(rows)
}

fn format_cell(rng: &mut StdRng, blank_prob: f64, value: f64) -> String {
    let roll: f64 = rng.r#gen();
    if roll < blank_prob {
        String::new()
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &std::path::Path, name: &str) -> SampleConfig {
        SampleConfig {
            out: dir.join(name),
            start: NaiveDate::from_ymd_opt(2023, 8, 2).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 8, 31).unwrap(),
            seed: 42,
            start_level: 501.0,
            drift: 0.05,
            vol: 0.6,
            spread: 7.0,
            gap_prob: 0.0,
            blank_prob: 0.0,
        }
    }

    #[test]
    fn same_seed_writes_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = config(dir.path(), "a.csv");
        let mut b = config(dir.path(), "b.csv");
        a.gap_prob = 0.2;
        a.blank_prob = 0.05;
        b.gap_prob = 0.2;
        b.blank_prob = 0.05;

        write_sample_csv(&a).unwrap();
        write_sample_csv(&b).unwrap();

        let left = std::fs::read_to_string(&a.out).unwrap();
        let right = std::fs::read_to_string(&b.out).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn rows_are_day_first_with_a_constant_spread() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), "rates.csv");
        let rows = write_sample_csv(&cfg).unwrap();
        assert_eq!(rows, 30);

        let contents = std::fs::read_to_string(&cfg.out).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("date,buy,sell"));

        let first = lines.next().unwrap();
        let cells: Vec<&str> = first.split(',').collect();
        assert_eq!(cells[0], "02/08/2023");
        let buy: f64 = cells[1].parse().unwrap();
        let sell: f64 = cells[2].parse().unwrap();
        assert!((sell - buy - 7.0).abs() < 0.011);
    }

    #[test]
    fn gap_probability_one_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), "rates.csv");
        cfg.gap_prob = 1.0;
        let err = write_sample_csv(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), "rates.csv");
        cfg.end = cfg.start.pred_opt().unwrap();
        assert!(write_sample_csv(&cfg).is_err());
    }
}
