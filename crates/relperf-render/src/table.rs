//! Formatted "mean ± stddev" tables
//!
//! Two layouts are supported:
//!
//! ```text
//! PointRows                         SeriesRows
//! Rels / Tx  Simple     Full                  1          10
//! ---------------------------       ---------------------------
//! 1          97% ± 3%   81% ± 4%    Simple    97% ± 3%   99% ± 1%
//! 10         99% ± 1%   88% ± 2%    Full      81% ± 4%   88% ± 2%
//! ```
//!
//! and two styles: aligned console text, or LaTeX table rows ready to paste
//! between `\begin{tabular}` and `\end{tabular}`.
//!
//! Cells resting on an undefined ratio are flagged: `inf ± NaN !` on the
//! console, `$inf \pm NaN$ (!)` in LaTeX with the flag outside the math.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::RenderError,
    format::{self, NumberFormat},
    series::{Series, StatCell},
};

/// Orientation of a table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableLayout {
    /// One row per parameter point, one column per series
    #[default]
    PointRows,
    /// One row per series, one column per parameter point
    SeriesRows,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum TableStyle {
    #[default]
    Console,
    Latex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    title: Option<String>,
    parameter_header: String,
    layout: TableLayout,
    format: NumberFormat,
    series: Vec<Series>,
}

impl Table {
    #[must_use]
    pub fn new(parameter_header: impl Into<String>, layout: TableLayout, format: NumberFormat) -> Self {
        Self {
            title: None,
            parameter_header: parameter_header.into(),
            layout,
            format,
            series: vec![],
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Appends a column (or row, for [`TableLayout::SeriesRows`]).
    ///
    /// # Errors
    ///
    /// * [`RenderError::EmptySeries`] if `series` has no points
    /// * [`RenderError::SchemaMismatch`] if it has a different number of
    ///   points than the series already added
    pub fn push_series(&mut self, series: Series) -> Result<(), RenderError> {
        series.ensure_not_empty()?;
        if let Some(first) = self.series.first() {
            if first.len() != series.len() {
                return Err(RenderError::SchemaMismatch {
                    reason: format!(
                        "series '{}' has {} points, but '{}' has {}",
                        series.label,
                        series.len(),
                        first.label,
                        first.len()
                    ),
                });
            }
            let misaligned = first
                .points
                .iter()
                .zip(&series.points)
                .any(|((a, _), (b, _))| a != b);
            if misaligned {
                warn!(
                    series = %series.label,
                    reference = %first.label,
                    "table series have different parameter values"
                );
            }
        }
        self.series.push(series);
        Ok(())
    }

    /// Renders the table.
    ///
    /// # Errors
    ///
    /// [`RenderError::NoSeries`] if no series were added.
    pub fn render(&self, style: TableStyle) -> Result<String, RenderError> {
        let first = self.series.first().ok_or(RenderError::NoSeries)?;

        for series in self.series.iter().filter(|s| s.undefined_count() > 0) {
            warn!(
                series = %series.label,
                undefined = series.undefined_count(),
                "table contains undefined values"
            );
        }

        let latex = style == TableStyle::Latex;
        let (header, rows) = match self.layout {
            TableLayout::PointRows => {
                let header = std::iter::once(self.parameter_header.clone())
                    .chain(self.series.iter().map(|s| s.label.clone()))
                    .collect::<Vec<_>>();
                let rows = first
                    .points
                    .iter()
                    .enumerate()
                    .map(|(i, (x, _))| {
                        std::iter::once(format::format_parameter(*x))
                            .chain(
                                self.series
                                    .iter()
                                    .map(|s| self.cell_text(&s.points[i].1, latex)),
                            )
                            .collect()
                    })
                    .collect::<Vec<Vec<_>>>();
                (header, rows)
            }
            TableLayout::SeriesRows => {
                let header = std::iter::once(self.parameter_header.clone())
                    .chain(first.points.iter().map(|(x, _)| format::format_parameter(*x)))
                    .collect::<Vec<_>>();
                let rows = self
                    .series
                    .iter()
                    .map(|s| {
                        std::iter::once(s.label.clone())
                            .chain(s.points.iter().map(|(_, c)| self.cell_text(c, latex)))
                            .collect()
                    })
                    .collect::<Vec<Vec<_>>>();
                (header, rows)
            }
        };

        Ok(match style {
            TableStyle::Console => self.render_console(&header, &rows),
            TableStyle::Latex => self.render_latex(&header, &rows),
        })
    }

    fn cell_text(&self, cell: &StatCell, latex: bool) -> String {
        let mean = self.format.format(cell.mean, latex);
        let std_dev = self.format.format(cell.std_dev, latex);
        match (latex, cell.is_flagged()) {
            (true, false) => format!(r"${mean} \pm {std_dev}$"),
            (true, true) => format!(r"${mean} \pm {std_dev}$ (!)"),
            (false, false) => format!("{mean} ± {std_dev}"),
            (false, true) => format!("{mean} ± {std_dev} !"),
        }
    }

    fn render_console(&self, header: &[String], rows: &[Vec<String>]) -> String {
        let widths = (0..header.len())
            .map(|col| {
                std::iter::once(&header[col])
                    .chain(rows.iter().map(|r| &r[col]))
                    .map(|s| s.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect::<Vec<_>>();

        let format_line = |cells: &[String]| {
            cells
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(col, (cell, &width))| {
                    if col == 0 {
                        format!("{cell:<width$}")
                    } else {
                        format!("{cell:>width$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
        };

        let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut lines = self.title.iter().cloned().collect::<Vec<_>>();
        lines.push(format!("  {}", format_line(header)));
        lines.push(format!("  {}", "-".repeat(total_width)));
        lines.extend(rows.iter().map(|row| format!("  {}", format_line(row))));
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_latex(&self, header: &[String], rows: &[Vec<String>]) -> String {
        let header_rule = match self.layout {
            TableLayout::PointRows => r"\hline \hline",
            TableLayout::SeriesRows => r"\hline",
        };

        let mut lines = self
            .title
            .iter()
            .map(|title| format!("% {title}"))
            .collect::<Vec<_>>();
        lines.push(format!(r" {} \\ {header_rule}", header.join(" & ")));
        lines.extend(rows.iter().map(|row| format!(r"{} \\ \hline", row.join(" & "))));
        lines.push(String::new());
        lines.join("\n")
    }
}
