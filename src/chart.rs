//! Plotters-powered SVG chart of the merged monthly sequence.
//!
//! Why Plotters?
//! - nicer axis + mesh rendering than hand-rolled SVG
//! - less manual work for ticks/labels
//! - easy to extend later (PNG backend, extra series, etc.)
//!
//! The SVG backend draws text as native `<text>` elements, so the reduced
//! feature set (no font rasterization) is enough here.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{ChartPoint, ForecastConfig};
use crate::error::AppError;

/// A lightweight, render-only chart description.
///
/// The chart is intentionally data-driven: all series and bounds are computed
/// outside the render call. This keeps `render_svg()` focused on drawing and
/// makes the data prep testable without touching a backend.
pub struct TrendChart {
    pub title: String,
    /// Month labels, index-aligned with the line series.
    pub labels: Vec<String>,
    /// Line series over the whole merged sequence (history + projection).
    pub buy_line: Vec<(i32, f64)>,
    pub sell_line: Vec<(i32, f64)>,
    /// Scatter series for observed months only (a prefix of the lines).
    pub buy_points: Vec<(i32, f64)>,
    pub sell_points: Vec<(i32, f64)>,
    /// Fixed y bounds (presentation constants, not derived from the data).
    pub y_bounds: [f64; 2],
    /// Symbol prefixed to each value annotation.
    pub annotation_symbol: String,
}

impl TrendChart {
    /// Build the chart description from the merged monthly sequence.
    pub fn from_points(points: &[ChartPoint], config: &ForecastConfig) -> TrendChart {
        let indexed = |f: fn(&ChartPoint) -> f64| -> Vec<(i32, f64)> {
            points
                .iter()
                .enumerate()
                .map(|(i, p)| (i as i32, f(p)))
                .collect()
        };
        let observed = |f: fn(&ChartPoint) -> f64| -> Vec<(i32, f64)> {
            points
                .iter()
                .enumerate()
                .filter(|(_, p)| p.observed)
                .map(|(i, p)| (i as i32, f(p)))
                .collect()
        };

        TrendChart {
            title: config.title.clone(),
            labels: points.iter().map(|p| p.label.clone()).collect(),
            buy_line: indexed(|p| p.buy),
            sell_line: indexed(|p| p.sell),
            buy_points: observed(|p| p.buy),
            sell_points: observed(|p| p.sell),
            y_bounds: [config.y_min, config.y_max],
            annotation_symbol: config.annotation_symbol.clone(),
        }
    }

    /// Render the chart to an SVG file.
    pub fn render_svg(&self, path: &Path, size: (u32, u32)) -> Result<(), AppError> {
        self.draw(path, size).map_err(|e| {
            AppError::compute(format!("Failed to render chart '{}': {e}", path.display()))
        })
    }

    fn draw(&self, path: &Path, size: (u32, u32)) -> Result<(), Box<dyn std::error::Error>> {
        let n = self.labels.len() as i32;
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];
        if n == 0 || !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return Err("nothing to draw (empty sequence or degenerate y bounds)".into());
        }

        let root = SVGBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 24))
            .margin(10)
            // The bottom area must fit a full rotated month label.
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 90)
            .build_cartesian_2d(-1..n, y0..y1)?;

        chart
            .configure_mesh()
            .x_labels(self.labels.len() + 2)
            .x_label_formatter(&|x| {
                usize::try_from(*x)
                    .ok()
                    .and_then(|i| self.labels.get(i))
                    .cloned()
                    .unwrap_or_default()
            })
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_desc("Month")
            .y_desc("Exchange rate")
            .light_line_style(RGBColor(220, 220, 220)) // light grey grid
            .draw()?;

        // Series styling follows the series, not the source: red/blue dots for
        // what was observed, warm/cool lines for the trends over everything.
        let buy_trend_color = RGBColor(255, 165, 0); // orange
        let sell_trend_color = RGBColor(128, 0, 128); // purple

        // 1) Observed monthly means.
        chart
            .draw_series(
                self.buy_points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, RED.filled())),
            )?
            .label("Buy (observed)")
            .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));
        chart
            .draw_series(
                self.sell_points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
            )?
            .label("Sell (observed)")
            .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));

        // 2) Trend lines across history + projection.
        chart
            .draw_series(LineSeries::new(
                self.buy_line.iter().copied(),
                &buy_trend_color,
            ))?
            .label("Buy trend")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], buy_trend_color));
        chart
            .draw_series(LineSeries::new(
                self.sell_line.iter().copied(),
                &sell_trend_color,
            ))?
            .label("Sell trend")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], sell_trend_color));

        // 3) Per-point value annotations, both series, every month.
        let annotation = |v: f64| format!("{}{:.2}", self.annotation_symbol, v);
        chart.draw_series(self.buy_line.iter().map(|&(x, y)| {
            Text::new(annotation(y), (x, y + 0.5), ("sans-serif", 11))
        }))?;
        chart.draw_series(self.sell_line.iter().map(|&(x, y)| {
            Text::new(annotation(y), (x, y + 0.5), ("sans-serif", 11))
        }))?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;

        root.present()?;
        Ok(())
    }
}
