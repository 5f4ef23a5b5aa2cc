//! Calendar helpers shared by aggregation and projection.

use chrono::{Datelike, NaiveDate};

/// Format a date as its month token, e.g. `August-2023`.
///
/// The full month name plus four-digit year is the join/group key used
/// throughout: the year suffix keeps the token unique when the same month
/// name recurs across years.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B-%Y").to_string()
}

/// Last calendar day of the given month, or `None` for out-of-range years.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Month-end dates falling inside `[start, end]`, ascending.
///
/// A month contributes its last day only when that day lies inside the
/// window, so a window ending mid-month excludes that month.
pub fn month_ends(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut year = start.year();
    let mut month = start.month();

    while (year, month) <= (end.year(), end.month()) {
        if let Some(eom) = last_day_of_month(year, month) {
            if eom >= start && eom <= end {
                out.push(eom);
            }
        }
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_label_formats_full_name_and_year() {
        assert_eq!(month_label(d(2023, 8, 15)), "August-2023");
        assert_eq!(month_label(d(2025, 1, 1)), "January-2025");
    }

    #[test]
    fn last_day_handles_year_boundary_and_leap_february() {
        assert_eq!(last_day_of_month(2024, 12), Some(d(2024, 12, 31)));
        assert_eq!(last_day_of_month(2024, 2), Some(d(2024, 2, 29)));
        assert_eq!(last_day_of_month(2025, 2), Some(d(2025, 2, 28)));
    }

    #[test]
    fn month_ends_default_forecast_window_has_twelve_points() {
        let ends = month_ends(d(2024, 8, 1), d(2025, 7, 31));
        assert_eq!(ends.len(), 12);
        assert_eq!(ends[0], d(2024, 8, 31));
        assert_eq!(ends[6], d(2025, 2, 28));
        assert_eq!(ends[11], d(2025, 7, 31));
    }

    #[test]
    fn month_ends_excludes_truncated_final_month() {
        let ends = month_ends(d(2024, 8, 1), d(2024, 10, 15));
        assert_eq!(ends, vec![d(2024, 8, 31), d(2024, 9, 30)]);
    }

    #[test]
    fn month_ends_empty_when_window_inverted() {
        assert!(month_ends(d(2025, 1, 1), d(2024, 1, 1)).is_empty());
    }
}
