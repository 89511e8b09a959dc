use std::io;

/// Errors raised while reading a result file.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to read result file {path}")]
    Io { path: String, source: io::Error },
    #[display("failed to parse result file {path}")]
    Csv { path: String, source: csv::Error },
    #[display("malformed input in {path} at line {line}: {reason}")]
    MalformedInput {
        path: String,
        line: u64,
        reason: String,
    },
    #[display("invalid delimiter {delimiter:?}: must be a single ASCII character")]
    InvalidDelimiter { delimiter: char },
}

/// Errors raised by selection, aggregation and ratio computation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("selection matched no rows")]
    EmptySelection,
    #[display("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },
    #[display(
        "shape mismatch: baseline has {baseline_rows}x{baseline_trials} samples, candidate has {candidate_rows}x{candidate_trials}"
    )]
    ShapeMismatch {
        baseline_rows: usize,
        baseline_trials: usize,
        candidate_rows: usize,
        candidate_trials: usize,
    },
    #[display("row range {start}..{end} is out of bounds for {rows} selected rows")]
    RowRangeOutOfBounds {
        start: usize,
        end: usize,
        rows: usize,
    },
}

impl AnalysisError {
    pub(crate) fn schema(reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            reason: reason.into(),
        }
    }
}
