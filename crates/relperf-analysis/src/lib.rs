//! Loading, filtering and reducing benchmark trial tables
//!
//! This crate implements the data half of a benchmark report: everything
//! between a raw result file written by the performance harness and the
//! per-point statistics a chart or table shows.
//!
//! # Overview
//!
//! A report flows through four stages, each a separate module:
//!
//! 1. **Load** ([`loader::load_table`]): parse `;`-delimited result files into a
//!    [`table::TrialTable`] validated against a declared [`schema::TrialSchema`]
//! 2. **Select** ([`table::TrialTable::select`]): keep the rows matching a
//!    [`selector::Selection`] (column equality predicates and an optional row range)
//! 3. **Aggregate** ([`aggregate::aggregate`]): reduce each row's trial samples to
//!    a [`relperf_stats::descriptive::SummaryStat`], paired with its parameter value
//! 4. **Compare** ([`ratio::ratio`]): divide a baseline's samples by a candidate's,
//!    trial by trial, and reduce to a [`relperf_stats::ratio::RatioStat`] per point
//!
//! # Result File Layout
//!
//! ```text
//! <header lines, skipped>
//! SINGLE_PROP;nocache;10;NO_FRAMEWORK;NO_PROPS;1532;1498;1610;...
//! SINGLE_PROP;nocache;10;CACHED;NO_PROPS;211;205;230;...
//! └──────────── metadata ────────────┘ └──── trial samples ────┘
//! ```
//!
//! Metadata columns are either categorical (`text`) or numeric (`integer`);
//! sample columns are always integers. The schema is declared by the caller,
//! never inferred from content.
//!
//! # Examples
//!
//! ```no_run
//! use relperf_analysis::{
//!     aggregate,
//!     axis::ParameterAxis,
//!     loader,
//!     schema::{ColumnType, TrialSchema},
//!     selector::Selection,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let schema = TrialSchema::new(
//!     vec![
//!         ColumnType::Text,
//!         ColumnType::Text,
//!         ColumnType::Integer,
//!         ColumnType::Text,
//!         ColumnType::Text,
//!     ],
//!     100,
//! )
//! .with_skip_lines(3);
//!
//! let table = loader::load_table(&["countRelationships.txt"], &schema)?;
//! let cached = table.select(&Selection::all().with(1, "nocache").with(3, "CACHED"))?;
//! let series = aggregate::aggregate(&cached, schema.sample_columns(), &ParameterAxis::column(2))?;
//!
//! for (degree, stat) in series.iter() {
//!     println!("{degree}: {:.1} ± {:.1}", stat.mean, stat.std_dev);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod axis;
pub mod error;
pub mod loader;
pub mod ratio;
pub mod samples;
pub mod schema;
pub mod selector;
pub mod table;

pub use self::error::{AnalysisError, LoadError};
