//! Command-line parsing for the exchange-rate trend forecaster.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the series/fitting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fxt", version, about = "Buy/Sell Exchange Rate Trend Forecaster")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: load, resample, aggregate, fit, project, chart.
    Run(RunArgs),
    /// Print the merged monthly table only (useful for scripting).
    Table(RunArgs),
    /// Generate a synthetic rate CSV shaped like the real export.
    Sample(SampleArgs),
}

/// Common options for `run` and `table`.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Input CSV with date, buy, and sell columns (Spanish headers accepted).
    #[arg(short = 'i', long, default_value = "DATA/usd_crc_exchange.csv")]
    pub input: PathBuf,

    /// Drop rows dated on or before this day (YYYY-MM-DD).
    #[arg(long, default_value = "2023-08-01")]
    pub cutoff: NaiveDate,

    /// First day of the forecast window (YYYY-MM-DD).
    #[arg(long, default_value = "2024-08-01")]
    pub forecast_start: NaiveDate,

    /// Last day of the forecast window (YYYY-MM-DD).
    #[arg(long, default_value = "2025-07-31")]
    pub forecast_end: NaiveDate,

    /// Where to write the SVG chart.
    #[arg(short = 'o', long, default_value = "fx_trend.svg")]
    pub chart: PathBuf,

    /// Skip writing the SVG chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 500)]
    pub height: u32,

    /// Lower bound of the chart's y axis.
    #[arg(long, default_value_t = 495.0)]
    pub y_min: f64,

    /// Upper bound of the chart's y axis.
    #[arg(long, default_value_t = 545.0)]
    pub y_max: f64,

    /// Chart title.
    #[arg(long, default_value = "CRC/USD exchange rate")]
    pub title: String,

    /// Symbol prefixed to the per-point value annotations.
    #[arg(long, default_value = "₡")]
    pub symbol: String,

    /// Also render an ASCII preview of the chart in the terminal.
    #[arg(long)]
    pub ascii: bool,

    /// ASCII preview width (columns).
    #[arg(long, default_value_t = 100)]
    pub ascii_width: usize,

    /// ASCII preview height (rows).
    #[arg(long, default_value_t = 20)]
    pub ascii_height: usize,

    /// Export the merged monthly table to CSV.
    #[arg(long = "export-table")]
    pub export_table: Option<PathBuf>,

    /// Export the fitted trends + projections to JSON.
    #[arg(long = "export-trend")]
    pub export_trend: Option<PathBuf>,
}

/// Options for generating a synthetic rate CSV.
#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Where to write the generated CSV.
    #[arg(short = 'o', long, default_value = "DATA/usd_crc_exchange.csv")]
    pub out: PathBuf,

    /// First day of the generated range (YYYY-MM-DD).
    #[arg(long, default_value = "2023-08-02")]
    pub start: NaiveDate,

    /// Last day of the generated range (YYYY-MM-DD).
    #[arg(long, default_value = "2024-07-31")]
    pub end: NaiveDate,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Buy level on the first day.
    #[arg(long, default_value_t = 501.0)]
    pub start_level: f64,

    /// Mean daily change of the buy level.
    #[arg(long, default_value_t = 0.05)]
    pub drift: f64,

    /// Std dev of the daily change.
    #[arg(long, default_value_t = 0.6)]
    pub vol: f64,

    /// Constant sell premium over buy.
    #[arg(long, default_value_t = 7.0)]
    pub spread: f64,

    /// Chance that a day gets no row (market closures).
    #[arg(long, default_value_t = 0.08)]
    pub gap_prob: f64,

    /// Chance that an emitted cell is left blank.
    #[arg(long, default_value_t = 0.01)]
    pub blank_prob: f64,
}
