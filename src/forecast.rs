//! Trend fitting and forward projection.
//!
//! Each monthly series (buy, sell) gets an independent least-squares line
//! over month index 1..=n. Projection re-bases the index: the first
//! forecast month is x = 1 again, so the projected levels read as "where a
//! fresh trend of this slope would put the rate", not as a continuation of
//! the historical index. Both projected series are then joined month by
//! month and appended to the observed months for presentation.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::domain::{ChartPoint, MonthlyAggregate, ProjectedMonth, ProjectedPoint, SeriesKind, TrendLine};
use crate::error::AppError;
use crate::math::fit_indexed;
use crate::series::calendar::month_label;

/// Fit a trend line to one monthly series, indexed 1..=n.
pub fn fit_series(months: &[MonthlyAggregate], kind: SeriesKind) -> Result<TrendLine, AppError> {
    let values: Vec<f64> = months.iter().map(|m| kind.mean_of(m)).collect();
    fit_indexed(&values).ok_or_else(|| {
        AppError::no_data(format!(
            "{} series has too few distinct months to fit a trend (need at least 2).",
            kind.display_name()
        ))
    })
}

/// Evaluate a fitted line at the forecast month-ends.
///
/// The month index restarts at 1 for the first forecast date. Values are
/// computed positionally first; if two dates share a month label, the first
/// occurrence is kept.
pub fn project_series(line: &TrendLine, month_ends: &[NaiveDate]) -> Vec<ProjectedPoint> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(month_ends.len());
    for (i, date) in month_ends.iter().enumerate() {
        let value = line.predict((i + 1) as f64);
        let label = month_label(*date);
        if seen.insert(label.clone()) {
            out.push(ProjectedPoint { label, value });
        }
    }
    out
}

/// Join the buy and sell projections on month label.
///
/// Only labels present in both series survive; order follows the buy side.
pub fn merge_projections(buy: &[ProjectedPoint], sell: &[ProjectedPoint]) -> Vec<ProjectedMonth> {
    let sell_by_label: HashMap<&str, f64> =
        sell.iter().map(|p| (p.label.as_str(), p.value)).collect();
    buy.iter()
        .filter_map(|p| {
            sell_by_label.get(p.label.as_str()).map(|&s| ProjectedMonth {
                label: p.label.clone(),
                buy: p.value,
                sell: s,
            })
        })
        .collect()
}

/// Append the projected months to the observed ones as a single timeline.
pub fn merge_timeline(months: &[MonthlyAggregate], projection: &[ProjectedMonth]) -> Vec<ChartPoint> {
    let mut out = Vec::with_capacity(months.len() + projection.len());
    for m in months {
        out.push(ChartPoint {
            label: m.label.clone(),
            buy: m.mean_buy,
            sell: m.mean_sell,
            observed: true,
        });
    }
    for p in projection {
        out.push(ChartPoint {
            label: p.label.clone(),
            buy: p.buy,
            sell: p.sell,
            observed: false,
        });
    }
    out
}
