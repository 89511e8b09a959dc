/// Errors raised while building or rendering a chart or table.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    #[display("series '{label}' has no points")]
    EmptySeries { label: String },
    #[display("nothing to render: no series were added")]
    NoSeries,
    #[display("schema mismatch: {reason}")]
    SchemaMismatch { reason: String },
    #[display("unsupported chart format for {path}: expected .svg")]
    UnsupportedFormat { path: String },
    #[display("failed to draw chart {path}: {message}")]
    Plot { path: String, message: String },
}
