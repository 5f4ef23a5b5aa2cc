//! Closed-form ordinary least squares for a single straight line.
//!
//! Both monthly series are fitted with the textbook two-parameter OLS
//! solution:
//!
//! ```text
//! slope     = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! ```
//!
//! Implementation choices:
//! - No matrix solver: with exactly two parameters the closed form is both
//!   faster and easier to verify than a general least-squares routine.
//! - The x values are the 1-based rank of each month in the aggregate
//!   sequence, not calendar time. `fit_indexed` encodes that convention.

use crate::domain::TrendLine;

/// Fit `y = slope·x + intercept` over paired samples.
///
/// Returns `None` when the system is degenerate: fewer than two samples,
/// mismatched lengths, non-finite inputs, or zero variance in `x`.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Option<TrendLine> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denom = n * sum_xx - sum_x * sum_x;
    if denom.abs() < 1e-12 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    if !(slope.is_finite() && intercept.is_finite()) {
        return None;
    }

    Some(TrendLine { slope, intercept })
}

/// Fit a line against the 1-based positional index: x = 1, 2, …, n.
pub fn fit_indexed(values: &[f64]) -> Option<TrendLine> {
    let xs: Vec<f64> = (1..=values.len()).map(|i| i as f64).collect();
    fit_line(&xs, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_line_recovers_exact_line() {
        // y = 2x with zero intercept.
        let fit = fit_line(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
    }

    #[test]
    fn fit_indexed_uses_one_based_ranks() {
        // Evenly spaced means: slope = step, intercept = first − step.
        let fit = fit_indexed(&[500.0, 510.0, 520.0]).unwrap();
        assert!((fit.slope - 10.0).abs() < 1e-9);
        assert!((fit.intercept - 490.0).abs() < 1e-9);
        assert!((fit.predict(1.0) - 500.0).abs() < 1e-9);
    }

    #[test]
    fn fit_line_flat_series_has_zero_slope() {
        let fit = fit_indexed(&[7.5, 7.5, 7.5, 7.5]).unwrap();
        assert!(fit.slope.abs() < 1e-12);
        assert!((fit.intercept - 7.5).abs() < 1e-12);
    }

    #[test]
    fn fit_line_rejects_degenerate_input() {
        assert!(fit_line(&[1.0], &[2.0]).is_none());
        assert!(fit_line(&[1.0, 2.0], &[2.0]).is_none());
        // Zero variance in x.
        assert!(fit_line(&[3.0, 3.0], &[1.0, 2.0]).is_none());
        assert!(fit_line(&[1.0, f64::NAN], &[1.0, 2.0]).is_none());
        assert!(fit_indexed(&[]).is_none());
    }
}
