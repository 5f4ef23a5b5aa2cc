//! Shared "forecast pipeline" logic used by the `run` and `table` subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> resample -> aggregate -> fit -> project -> merge
//!
//! The handlers in `app` then focus on presentation (summary vs table).

use chrono::NaiveDate;

use crate::domain::{
    ChartPoint, DailyRate, ForecastConfig, MonthlyAggregate, ProjectedMonth, ProjectedPoint,
    SeriesKind, TrendLine,
};
use crate::error::AppError;
use crate::forecast::{fit_series, merge_projections, merge_timeline, project_series};
use crate::io::ingest::IngestStats;
use crate::series::{ResampleStats, aggregate_monthly, month_ends, resample_daily};

/// All computed outputs of a single forecasting run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestStats,
    pub resample: ResampleStats,
    pub daily: Vec<DailyRate>,
    pub monthly: Vec<MonthlyAggregate>,
    pub buy_trend: TrendLine,
    pub sell_trend: TrendLine,
    /// Month-end dates the projections fall on.
    pub window: Vec<NaiveDate>,
    /// Per-series projections, before the label join.
    pub buy_points: Vec<ProjectedPoint>,
    pub sell_points: Vec<ProjectedPoint>,
    pub projection: Vec<ProjectedMonth>,
    pub merged: Vec<ChartPoint>,
}

/// Execute the full forecasting pipeline and return the computed outputs.
pub fn run_forecast(config: &ForecastConfig) -> Result<RunOutput, AppError> {
    config.validate()?;

    // 1) Load the raw rows, applying the cutoff filter.
    let ingested = crate::io::ingest::load_rate_rows(&config.input_path, config.cutoff)?;

    // 2) Clean + reindex to one row per calendar day.
    let (daily, resample) = resample_daily(&ingested.rows)?;

    // 3) Reduce to monthly means.
    let monthly = aggregate_monthly(&daily);

    // 4) Fit one trend line per series over month index 1..=n.
    let buy_trend = fit_series(&monthly, SeriesKind::Buy)?;
    let sell_trend = fit_series(&monthly, SeriesKind::Sell)?;

    // 5) Project onto the forecast month-ends.
    let window = month_ends(config.forecast_start, config.forecast_end);
    if window.is_empty() {
        return Err(AppError::config(format!(
            "Forecast window {} .. {} contains no month-end dates.",
            config.forecast_start, config.forecast_end
        )));
    }
    let buy_points = project_series(&buy_trend, &window);
    let sell_points = project_series(&sell_trend, &window);

    // 6) Join the two projections, then append them to history.
    let projection = merge_projections(&buy_points, &sell_points);
    let merged = merge_timeline(&monthly, &projection);

    Ok(RunOutput {
        ingest: ingested.stats,
        resample,
        daily,
        monthly,
        buy_trend,
        sell_trend,
        window,
        buy_points,
        sell_points,
        projection,
        merged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::path::PathBuf;

    fn config(input: PathBuf) -> ForecastConfig {
        ForecastConfig {
            input_path: input,
            cutoff: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
            forecast_start: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            forecast_end: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
            chart_path: PathBuf::from("fx_trend.svg"),
            chart: false,
            chart_width: 1000,
            chart_height: 500,
            y_min: 495.0,
            y_max: 545.0,
            title: "CRC/USD exchange rate".to_string(),
            annotation_symbol: "₡".to_string(),
            ascii: false,
            ascii_width: 100,
            ascii_height: 20,
            export_table: None,
            export_trend: None,
        }
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn pipeline_runs_end_to_end() {
        let file = write_csv(
            "fecha,compra,venta\n\
             02/08/2023,500.00,507.00\n\
             15/08/2023,501.00,508.00\n\
             01/09/2023,502.00,509.00\n\
             20/09/2023,503.00,510.00\n\
             05/10/2023,504.00,511.00\n",
        );
        let out = run_forecast(&config(file.path().to_path_buf())).unwrap();

        assert_eq!(out.monthly.len(), 3);
        assert_eq!(out.monthly[0].label, "August-2023");
        assert_eq!(out.window.len(), 12);
        assert_eq!(out.projection.len(), 12);
        assert_eq!(out.merged.len(), 15);

        assert!(out.merged[0].observed);
        assert!(!out.merged[3].observed);
        assert_eq!(out.merged[3].label, "August-2024");
        assert_eq!(out.merged[14].label, "July-2025");

        // Projection evaluates the fit at x = 1..=12.
        assert!((out.projection[0].buy - out.buy_trend.predict(1.0)).abs() < 1e-9);
        assert!((out.projection[11].sell - out.sell_trend.predict(12.0)).abs() < 1e-9);
    }

    #[test]
    fn bad_y_bounds_fail_before_touching_the_input() {
        let mut cfg = config(PathBuf::from("does-not-exist.csv"));
        cfg.y_max = cfg.y_min;
        let err = run_forecast(&cfg).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn single_month_of_data_cannot_be_fitted() {
        let file = write_csv(
            "fecha,compra,venta\n\
             02/08/2023,500.00,507.00\n\
             15/08/2023,501.00,508.00\n",
        );
        let err = run_forecast(&config(file.path().to_path_buf())).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
