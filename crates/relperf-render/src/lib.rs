//! Charts and tables for benchmark reports
//!
//! The reporter turns named, styled series of per-point statistics into
//! output a reader can compare at a glance:
//!
//! - [`chart::Chart`]: a multi-series line chart with independent log or linear
//!   axes, saved as SVG
//! - [`table::Table`]: a "mean ± stddev" table rendered for the console or as
//!   LaTeX table rows
//!
//! Both keep the series in the order the caller added them.
//!
//! # Undefined values
//!
//! A ratio computed from a zero-latency sample is infinite or `NaN`. Such
//! cells are never hidden: tables print them as `inf`/`NaN` followed by a
//! `!` marker, and charts leave a gap in the curve and append the number of
//! undefined points to the legend entry.
//!
//! # Examples
//!
//! ```
//! use relperf_render::{
//!     format::NumberFormat,
//!     series::{Series, StatCell},
//!     style::{Color, SeriesStyle},
//!     table::{Table, TableLayout, TableStyle},
//! };
//!
//! let series = Series::new(
//!     "Full Relcount",
//!     SeriesStyle::solid(Color::Orange),
//!     [(1.0, StatCell::new(0.5, 0.05)), (10.0, StatCell::new(0.75, 0.1))],
//! );
//! let mut table = Table::new("Rels / Tx", TableLayout::PointRows, NumberFormat::percent(0));
//! table.push_series(series).unwrap();
//!
//! let latex = table.render(TableStyle::Latex).unwrap();
//! assert!(latex.contains(r"1 & $50\% \pm 5\%$ \\ \hline"));
//! ```

pub mod chart;
pub mod error;
pub mod format;
pub mod series;
pub mod style;
pub mod table;

pub use self::error::RenderError;
