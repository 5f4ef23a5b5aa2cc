//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the series/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::domain::{ChartPoint, ForecastConfig, SeriesKind, TrendLine};

/// Format the full run summary (input accounting + series shape + projection span).
pub fn format_run_summary(output: &RunOutput, config: &ForecastConfig) -> String {
    let mut out = String::new();

    out.push_str("=== fxt - Exchange Rate Trend Forecast ===\n");
    out.push_str(&format!("Input: {}\n", config.input_path.display()));
    out.push_str(&format!("Keep rows after: {}\n", config.cutoff));
    out.push_str(&format!(
        "Forecast window: {} .. {}\n",
        config.forecast_start, config.forecast_end
    ));
    out.push('\n');

    out.push_str(&format!(
        "Ingest: read={} | kept={} | unparsable dates={} | at/before cutoff={}\n",
        output.ingest.rows_read,
        output.ingest.rows_kept,
        output.ingest.unparsable_dates,
        output.ingest.before_cutoff,
    ));
    out.push_str(&format!(
        "Daily: days={} | filled={} | incomplete dropped={} | duplicates collapsed={}\n",
        output.resample.days_out,
        output.resample.days_filled,
        output.resample.incomplete_dropped,
        output.resample.duplicates_collapsed,
    ));
    out.push_str(&format!(
        "Monthly: n={}{}\n",
        output.monthly.len(),
        span_suffix(
            output.monthly.first().map(|m| m.label.as_str()),
            output.monthly.last().map(|m| m.label.as_str()),
        ),
    ));
    out.push_str(&format!(
        "Projection: n={}{}\n",
        output.projection.len(),
        span_suffix(
            output.projection.first().map(|p| p.label.as_str()),
            output.projection.last().map(|p| p.label.as_str()),
        ),
    ));
    out.push('\n');

    out
}

/// Format one fitted line as a plain equation, e.g. `Buy: y = 0.5x + 500`.
pub fn format_trend_equation(kind: SeriesKind, line: &TrendLine) -> String {
    format!(
        "{}: y = {}x + {}",
        kind.display_name(),
        line.slope,
        line.intercept
    )
}

/// Format the merged observed + projected months as an aligned table.
pub fn format_monthly_table(points: &[ChartPoint]) -> String {
    let mut out = String::new();

    out.push_str(
        format!(
            "{:<16} {:>10} {:>10} {:<9}\n",
            "month", "buy", "sell", "source"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<16} {:-<10} {:-<10} {:-<9}\n", "", "", "", "").trim_end());
    out.push('\n');

    for p in points {
        let source = if p.observed { "observed" } else { "projected" };
        out.push_str(
            format!(
                "{:<16} {:>10.2} {:>10.2} {:<9}\n",
                p.label, p.buy, p.sell, source
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn span_suffix(first: Option<&str>, last: Option<&str>) -> String {
    match (first, last) {
        (Some(a), Some(b)) => format!(" ({a} .. {b})"),
        _ => String::new(),
    }
}
