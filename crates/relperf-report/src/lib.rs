//! End-to-end benchmark reports
//!
//! A [`spec::ReportSpec`] declares the input files, the configurations under
//! comparison and the charts and tables to draw from them.
//! [`pipeline::generate_report`] validates the spec and runs it:
//!
//! ```text
//! files ─load─▶ TrialTable ─select─▶ configuration rows ─┬─aggregate─▶ mean ± stddev ─┬─▶ Chart
//!                                                         └─ratio─────▶ mean ± stddev ─┴─▶ Table
//! ```
//!
//! Every stage failure aborts the report, so a [`pipeline::ReportOutput`] is
//! always complete.

pub mod error;
pub mod pipeline;
pub mod spec;

pub use self::{
    error::{ReportError, SpecError},
    pipeline::{ReportOutput, generate_report},
};
