//! Cleaning and daily reindexing of the raw rows.
//!
//! The loader hands over rows that passed the date filters but may still:
//! - be out of order
//! - repeat a calendar day
//! - miss one or both numeric values
//!
//! This module turns them into a dense daily series: sorted, deduplicated,
//! complete rows only, one record per calendar day with gaps forward-filled
//! from the most recent prior day. Every row it removes is counted so the
//! run summary can surface it.

use chrono::Duration;

use crate::domain::{DailyRate, RateRow};
use crate::error::AppError;

/// Row accounting for the cleaning + reindex step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResampleStats {
    pub rows_in: usize,
    /// Rows dropped because buy or sell was missing.
    pub incomplete_dropped: usize,
    /// Extra rows removed when a calendar day appeared more than once.
    pub duplicates_collapsed: usize,
    /// Calendar days synthesized by the forward-fill.
    pub days_filled: usize,
    pub days_out: usize,
}

/// Build the dense daily series from cleaned raw rows.
///
/// Duplicate dates collapse to the last row seen for that day (a later row
/// supersedes an earlier correction). Because incomplete rows are dropped
/// before reindexing, the first surviving day is always complete and the
/// forward-fill always has a seed value.
pub fn resample_daily(rows: &[RateRow]) -> Result<(Vec<DailyRate>, ResampleStats), AppError> {
    let mut stats = ResampleStats {
        rows_in: rows.len(),
        ..ResampleStats::default()
    };

    // Complete rows only, then a stable sort so same-day rows keep file order.
    let mut complete: Vec<DailyRate> = rows
        .iter()
        .filter_map(|r| match (r.buy, r.sell) {
            (Some(buy), Some(sell)) => Some(DailyRate {
                date: r.date,
                buy,
                sell,
            }),
            _ => None,
        })
        .collect();
    stats.incomplete_dropped = stats.rows_in - complete.len();
    complete.sort_by_key(|r| r.date);

    // Collapse duplicate days, last row wins.
    let mut deduped: Vec<DailyRate> = Vec::with_capacity(complete.len());
    for row in complete {
        match deduped.last_mut() {
            Some(prev) if prev.date == row.date => *prev = row,
            _ => deduped.push(row),
        }
    }
    stats.duplicates_collapsed = stats.rows_in - stats.incomplete_dropped - deduped.len();

    let (Some(first), Some(last)) = (deduped.first().copied(), deduped.last().copied()) else {
        return Err(AppError::no_data(
            "No complete rows remain after cleaning; nothing to resample.",
        ));
    };

    // Reindex to one record per calendar day, carrying values forward.
    let span_days = (last.date - first.date).num_days();
    let mut out = Vec::with_capacity(span_days as usize + 1);
    let mut next_obs = 0usize;
    let mut current = first;
    for offset in 0..=span_days {
        let day = first
            .date
            .checked_add_signed(Duration::days(offset))
            .ok_or_else(|| AppError::compute("Calendar overflow while reindexing."))?;
        if next_obs < deduped.len() && deduped[next_obs].date == day {
            current = deduped[next_obs];
            next_obs += 1;
        }
        out.push(DailyRate {
            date: day,
            buy: current.buy,
            sell: current.sell,
        });
    }

    stats.days_out = out.len();
    stats.days_filled = out.len() - deduped.len();
    Ok((out, stats))
}
