//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and cleaned series records (`RateRow`, `DailyRate`)
//! - monthly aggregation and projection records (`MonthlyAggregate`, `ProjectedPoint`, ...)
//! - fitted trend parameters (`TrendLine`)
//! - the resolved run configuration (`ForecastConfig`)

pub mod types;

pub use types::*;
