//! Monthly aggregation of the dense daily series.
//!
//! Groups consecutive days that share a calendar month and reduces each
//! group to the arithmetic mean of buy and sell. Because the daily series
//! is dense, groups are contiguous runs and a single index sweep suffices.
//! Partial months at either end of the data are kept; their means simply
//! cover fewer days.

use chrono::Datelike;

use crate::domain::{DailyRate, MonthlyAggregate};
use crate::series::calendar::month_label;

/// Reduce the daily series to one mean row per calendar month, in order.
pub fn aggregate_monthly(daily: &[DailyRate]) -> Vec<MonthlyAggregate> {
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < daily.len() {
        let key = (daily[i].date.year(), daily[i].date.month());
        let mut j = i;
        let mut sum_buy = 0.0;
        let mut sum_sell = 0.0;
        while j < daily.len() && (daily[j].date.year(), daily[j].date.month()) == key {
            sum_buy += daily[j].buy;
            sum_sell += daily[j].sell;
            j += 1;
        }
        let days = j - i;
        out.push(MonthlyAggregate {
            label: month_label(daily[i].date),
            mean_buy: sum_buy / days as f64,
            mean_sell: sum_sell / days as f64,
            days,
        });
        i = j;
    }
    out
}
