//! Multi-series line charts
//!
//! A [`Chart`] is a plain value: series are added in the order they should
//! appear in the legend, and nothing is drawn until [`Chart::save`] is called.
//! Log scales are applied by projecting values to `log10` before plotting, so
//! non-positive values on a log axis become gaps just like undefined ratios.

use std::path::Path;

use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    element::ErrorBar,
    prelude::*,
    series::DashedLineSeries,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::RenderError,
    series::{Series, StatCell},
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

impl Scale {
    fn project(self, value: f64) -> Option<f64> {
        let projected = match self {
            Scale::Linear => value,
            Scale::Log if value > 0.0 => value.log10(),
            Scale::Log => return None,
        };
        projected.is_finite().then_some(projected)
    }

    fn tick_label(self, value: f64) -> String {
        let value = match self {
            Scale::Linear => value,
            Scale::Log => 10f64.powf(value),
        };
        let text = format!("{value:.3}");
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    pub label: String,
    #[serde(default)]
    pub scale: Scale,
}

impl Axis {
    #[must_use]
    pub fn new(label: impl Into<String>, scale: Scale) -> Self {
        Self {
            label: label.into(),
            scale,
        }
    }

    #[must_use]
    pub fn linear(label: impl Into<String>) -> Self {
        Self::new(label, Scale::Linear)
    }

    #[must_use]
    pub fn log(label: impl Into<String>) -> Self {
        Self::new(label, Scale::Log)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    #[default]
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    Hidden,
}

impl LegendPosition {
    fn to_plotters(self) -> Option<SeriesLabelPosition> {
        match self {
            LegendPosition::UpperLeft => Some(SeriesLabelPosition::UpperLeft),
            LegendPosition::UpperRight => Some(SeriesLabelPosition::UpperRight),
            LegendPosition::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
            LegendPosition::LowerRight => Some(SeriesLabelPosition::LowerRight),
            LegendPosition::Hidden => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: LegendPosition,
    /// Image size in pixels
    pub size: (u32, u32),
    series: Vec<Series>,
}

/// A run of consecutive drawable points: `(x, y, y_low, y_high)` in projected
/// coordinates.
type Segment = Vec<(f64, f64, f64, f64)>;

impl Chart {
    #[must_use]
    pub fn new(title: impl Into<String>, x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            title: title.into(),
            x_axis,
            y_axis,
            legend: LegendPosition::default(),
            size: (1024, 768),
            series: vec![],
        }
    }

    #[must_use]
    pub fn with_legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Appends a curve. Curves are drawn and listed in the legend in the order
    /// they were added.
    ///
    /// # Errors
    ///
    /// [`RenderError::EmptySeries`] if `series` has no points.
    pub fn push_series(&mut self, series: Series) -> Result<(), RenderError> {
        series.ensure_not_empty()?;
        self.series.push(series);
        Ok(())
    }

    /// Draws the chart to `path` as SVG.
    ///
    /// # Errors
    ///
    /// * [`RenderError::NoSeries`] if no series were added
    /// * [`RenderError::UnsupportedFormat`] unless the extension is `.svg`
    /// * [`RenderError::Plot`] if drawing or writing the image fails
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        if self.series.is_empty() {
            return Err(RenderError::NoSeries);
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let plot_error = |message: String| RenderError::Plot {
            path: path.display().to_string(),
            message,
        };
        if extension.as_deref() != Some("svg") {
            return Err(RenderError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        self.draw(&root).map_err(plot_error)?;
        debug!(path = %path.display(), series = self.series.len(), "chart saved");
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<(), String> {
        let x_scale = self.x_axis.scale;
        let y_scale = self.y_axis.scale;
        let segments = self
            .series
            .iter()
            .map(|s| segments(s, x_scale, y_scale))
            .collect::<Vec<_>>();
        let points = segments.iter().flatten().flatten();
        let x_range = padded_range(points.clone().map(|p| p.0));
        let y_range = padded_range(points.flat_map(|p| [p.2, p.3]));

        root.fill(&WHITE).map_err(plot_err)?;
        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(plot_err)?;

        let x_labels = |v: &f64| x_scale.tick_label(*v);
        let y_labels = |v: &f64| y_scale.tick_label(*v);
        chart
            .configure_mesh()
            .x_desc(self.x_axis.label.as_str())
            .y_desc(self.y_axis.label.as_str())
            .x_label_formatter(&x_labels)
            .y_label_formatter(&y_labels)
            .draw()
            .map_err(plot_err)?;

        for (series, segments) in self.series.iter().zip(&segments) {
            let shape = series.style.color.rgb().stroke_width(2);
            let label = legend_label(series);
            let legend = move |(x, y): (i32, i32)| PathElement::new(vec![(x, y), (x + 20, y)], shape);

            if segments.is_empty() {
                warn!(series = %series.label, "series has no drawable points");
                chart
                    .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
                    .map_err(plot_err)?
                    .label(label.as_str())
                    .legend(legend);
                continue;
            }

            for (i, segment) in segments.iter().enumerate() {
                let line = segment.iter().map(|&(x, y, _, _)| (x, y));
                let anno = match series.style.line.dash_pattern() {
                    None => chart.draw_series(LineSeries::new(line, shape)),
                    Some((size, spacing)) => {
                        chart.draw_series(DashedLineSeries::new(line, size, spacing, shape))
                    }
                }
                .map_err(plot_err)?;
                if i == 0 {
                    anno.label(label.as_str()).legend(legend);
                }
            }

            if series.style.error_bars {
                chart
                    .draw_series(segments.iter().flatten().map(|&(x, y, low, high)| {
                        ErrorBar::new_vertical(x, low, y, high, shape, 8)
                    }))
                    .map_err(plot_err)?;
            }
        }

        if let Some(position) = self.legend.to_plotters() {
            chart
                .configure_series_labels()
                .position(position)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
        Ok(())
    }
}

fn plot_err<E: std::error::Error + Send + Sync>(error: DrawingAreaErrorKind<E>) -> String {
    error.to_string()
}

fn legend_label(series: &Series) -> String {
    match series.undefined_count() {
        0 => series.label.clone(),
        n => format!("{} [{n} undefined]", series.label),
    }
}

/// Splits a series into runs of drawable points, projected onto the axis
/// scales. Flagged cells and values a log axis cannot show end a run.
fn segments(series: &Series, x_scale: Scale, y_scale: Scale) -> Vec<Segment> {
    let mut segments = vec![];
    let mut current: Segment = vec![];
    for (x, cell) in &series.points {
        match project(*x, cell, x_scale, y_scale) {
            Some(point) => current.push(point),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn project(x: f64, cell: &StatCell, x_scale: Scale, y_scale: Scale) -> Option<(f64, f64, f64, f64)> {
    if cell.is_flagged() {
        return None;
    }
    let x = x_scale.project(x)?;
    let y = y_scale.project(cell.mean)?;
    let low = y_scale.project(cell.mean - cell.std_dev).unwrap_or(y);
    let high = y_scale.project(cell.mean + cell.std_dev).unwrap_or(y);
    Some((x, y, low, high))
}

fn padded_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, LineStyle, SeriesStyle};

    fn series(label: &str, points: &[(f64, f64)]) -> Series {
        Series::new(
            label,
            SeriesStyle::new(Color::Green, LineStyle::Dashed).with_error_bars(),
            points.iter().map(|&(x, y)| (x, StatCell::new(y, 0.1))),
        )
    }

    #[test]
    fn test_segments_split_at_undefined_points() {
        let s = series(
            "ratio",
            &[(1.0, 1.0), (2.0, f64::INFINITY), (3.0, 2.0), (4.0, 3.0)],
        );
        let segments = segments(&s, Scale::Linear, Scale::Linear);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn test_log_scale_drops_non_positive_values() {
        let s = series("latency", &[(0.0, 1.0), (10.0, 100.0), (100.0, 1000.0)]);
        let segments = segments(&s, Scale::Log, Scale::Log);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
        let (x, y, _, _) = segments[0][0];
        assert!((x - 1.0).abs() < 1e-12);
        assert!((y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(Scale::Log.tick_label(2.0), "100");
        assert_eq!(Scale::Linear.tick_label(0.25), "0.25");
        assert_eq!(Scale::Linear.tick_label(3.0), "3");
    }

    #[test]
    fn test_legend_label_counts_undefined_points() {
        let s = series("ratio", &[(1.0, 1.0), (2.0, f64::NAN)]);
        assert_eq!(legend_label(&s), "ratio [1 undefined]");
    }

    #[test]
    fn test_save_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let mut chart = Chart::new("Write latency", Axis::log("Rels / Tx"), Axis::log("µs"))
            .with_legend(LegendPosition::LowerRight);
        chart
            .push_series(series("Simple", &[(1.0, 10.0), (10.0, 50.0), (100.0, 300.0)]))
            .unwrap();
        chart
            .push_series(series("Broken", &[(1.0, f64::INFINITY)]))
            .unwrap();
        chart.save(&path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Simple"));
        assert!(svg.contains("Broken [1 undefined]"));
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut chart = Chart::new("t", Axis::linear("x"), Axis::linear("y"));
        chart.push_series(series("s", &[(1.0, 1.0)])).unwrap();
        assert!(matches!(
            chart.save(&dir.path().join("chart.pdf")),
            Err(RenderError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_save_rejects_png_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let mut chart = Chart::new("Read latency", Axis::log("Degree"), Axis::log("ms"));
        chart
            .push_series(series("Plain", &[(10.0, 5.0), (100.0, 40.0)]))
            .unwrap();
        assert!(matches!(
            chart.save(&path),
            Err(RenderError::UnsupportedFormat { .. })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_empty_chart_and_series() {
        let dir = tempfile::tempdir().unwrap();
        let mut chart = Chart::new("t", Axis::linear("x"), Axis::linear("y"));
        assert!(matches!(
            chart.save(&dir.path().join("chart.svg")),
            Err(RenderError::NoSeries)
        ));
        assert!(matches!(
            chart.push_series(series("empty", &[])),
            Err(RenderError::EmptySeries { .. })
        ));
    }
}
