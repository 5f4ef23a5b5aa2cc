//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - buy trend: `-` line, observed buy months: `o`
//! - sell trend: `=` line, observed sell months: `x`
//!
//! Lines span the whole merged sequence (history + projection); scatter
//! marks are drawn for observed months only, on top of the lines.

use crate::domain::ChartPoint;

/// Render the merged monthly sequence as a fixed-size character grid.
pub fn render_ascii_chart(points: &[ChartPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Lines first (so scatter marks can overlay).
    let buy: Vec<f64> = points.iter().map(|p| p.buy).collect();
    let sell: Vec<f64> = points.iter().map(|p| p.sell).collect();
    draw_series(&mut grid, &buy, y_min, y_max, '-');
    draw_series(&mut grid, &sell, y_min, y_max, '=');

    for (i, p) in points.iter().enumerate() {
        if !p.observed {
            continue;
        }
        let x = map_x(i, points.len(), width);
        grid[map_y(p.buy, y_min, y_max, height)][x] = 'o';
        grid[map_y(p.sell, y_min, y_max, height)][x] = 'x';
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    let span = match (points.first(), points.last()) {
        (Some(a), Some(b)) => format!(" ({} .. {})", a.label, b.label),
        _ => String::new(),
    };
    out.push_str(&format!(
        "Plot: months={}{span} | y=[{y_min:.2}, {y_max:.2}]\n",
        points.len()
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(points: &[ChartPoint]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_y = min_y.min(p.buy).min(p.sell);
        max_y = max_y.max(p.buy).max(p.sell);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = (i as f64 / (n as f64 - 1.0)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_series(grid: &mut [Vec<char>], values: &[f64], y_min: f64, y_max: f64, ch: char) {
    if values.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for (i, &v) in values.iter().enumerate() {
        let x = map_x(i, values.len(), width);
        let y = map_y(v, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, ch);
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish). Only writes blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, buy: f64, sell: f64, observed: bool) -> ChartPoint {
        ChartPoint {
            label: label.to_string(),
            buy,
            sell,
            observed,
        }
    }

    #[test]
    fn chart_golden_snapshot_small() {
        let points = vec![
            point("August-2023", 100.0, 110.0, true),
            point("September-2023", 105.0, 115.0, true),
            point("August-2024", 110.0, 120.0, false),
        ];

        let txt = render_ascii_chart(&points, 10, 5);
        let expected = concat!(
            "Plot: months=3 (August-2023 .. August-2024) | y=[99.00, 121.00]\n",
            "       ===\n",
            "   ==x=   \n",
            "x==    ---\n",
            "   --o-   \n",
            "o--       \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn projected_months_get_lines_but_no_scatter() {
        let points = vec![
            point("August-2023", 100.0, 110.0, true),
            point("August-2024", 110.0, 120.0, false),
        ];
        let txt = render_ascii_chart(&points, 20, 8);

        // One 'o' and one 'x' for the single observed month.
        assert_eq!(txt.matches('o').count(), 1);
        assert_eq!(txt.matches('x').count(), 1);
        assert!(txt.contains('-'));
        assert!(txt.contains('='));
    }

    #[test]
    fn empty_input_renders_a_blank_grid() {
        let txt = render_ascii_chart(&[], 10, 5);
        assert!(txt.starts_with("Plot: months=0 |"));
        assert_eq!(txt.lines().count(), 6);
    }
}
