//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built once per run and passed by reference through the pipeline
//! - exported to CSV/JSON where the run asks for it
//! - asserted against directly in tests

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which of the two parallel rate series an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Buy,
    Sell,
}

impl SeriesKind {
    /// Human-readable label for terminal output and chart legends.
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesKind::Buy => "Buy",
            SeriesKind::Sell => "Sell",
        }
    }

    /// Select this series' monthly mean from an aggregate.
    pub fn mean_of(self, aggregate: &MonthlyAggregate) -> f64 {
        match self {
            SeriesKind::Buy => aggregate.mean_buy,
            SeriesKind::Sell => aggregate.mean_sell,
        }
    }
}

/// A raw input row after date parsing and the cutoff filter.
///
/// Numeric cells that were empty or failed to parse load as `None`; the
/// resampler drops such rows before reindexing. Once parsed, a row is never
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRow {
    pub date: NaiveDate,
    pub buy: Option<f64>,
    pub sell: Option<f64>,
}

/// One fully-populated day of the dense daily series.
///
/// Invariant (enforced by the resampler): consecutive records differ by
/// exactly one calendar day, with no gaps and no duplicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRate {
    pub date: NaiveDate,
    pub buy: f64,
    pub sell: f64,
}

/// Mean buy/sell rate for one calendar month of the daily series.
///
/// `label` is the `"%B-%Y"` month token (e.g. `August-2023`) that serves as
/// the join/group key downstream; the four-digit year keeps it unique across
/// years sharing a month name. `days` is how many daily observations the mean
/// covers — a partial first or last month is still emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyAggregate {
    pub label: String,
    pub mean_buy: f64,
    pub mean_sell: f64,
    pub days: usize,
}

/// Fitted per-series trend parameters. Ephemeral: recomputed every run and
/// only used to generate projected points (and the printed equations).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Evaluate the line at positional index `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// A single projected month for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub label: String,
    pub value: f64,
}

/// Buy and sell projections joined on their shared month label.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMonth {
    pub label: String,
    pub buy: f64,
    pub sell: f64,
}

/// One entry of the merged presentation sequence: all historical months in
/// chronological order, then all projected months in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub buy: f64,
    pub sell: f64,
    /// `true` for historical aggregates, `false` for projected months.
    pub observed: bool,
}

/// A saved trend file (JSON): the fitted lines plus their projections,
/// with enough run metadata to interpret them later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendFile {
    pub tool: String,
    pub cutoff: NaiveDate,
    pub forecast_start: NaiveDate,
    pub forecast_end: NaiveDate,
    pub buy: TrendSeries,
    pub sell: TrendSeries,
}

/// One series' slice of a [`TrendFile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    pub fit: TrendLine,
    pub points: Vec<ProjectedPoint>,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags; the defaults describe a complete run, so
/// a bare invocation needs no flags.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub input_path: PathBuf,
    /// Rows dated on or before this day are dropped.
    pub cutoff: NaiveDate,
    /// First and last day of the projection window; projected points fall on
    /// the month-end dates inside it.
    pub forecast_start: NaiveDate,
    pub forecast_end: NaiveDate,

    pub chart_path: PathBuf,
    pub chart: bool,
    pub chart_width: u32,
    pub chart_height: u32,
    /// Fixed vertical axis bounds (presentation constants, not computed).
    pub y_min: f64,
    pub y_max: f64,
    pub title: String,
    /// Symbol prefixed to per-point value annotations (e.g. `₡`).
    pub annotation_symbol: String,

    pub ascii: bool,
    pub ascii_width: usize,
    pub ascii_height: usize,

    pub export_table: Option<PathBuf>,
    pub export_trend: Option<PathBuf>,
}

impl ForecastConfig {
    /// Validate the cross-field constraints clap cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.forecast_end < self.forecast_start {
            return Err(AppError::config(format!(
                "Forecast window is empty: end {} is before start {}.",
                self.forecast_end, self.forecast_start
            )));
        }
        if !(self.y_min.is_finite() && self.y_max.is_finite() && self.y_max > self.y_min) {
            return Err(AppError::config(format!(
                "Invalid y-axis bounds: min={}, max={} (must be finite and max > min).",
                self.y_min, self.y_max
            )));
        }
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(AppError::config("Chart dimensions must be > 0."));
        }
        Ok(())
    }
}
