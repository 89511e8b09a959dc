use relperf_analysis::{AnalysisError, LoadError};
use relperf_render::RenderError;

/// A [`ReportSpec`](crate::spec::ReportSpec) that cannot be run.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SpecError {
    #[display("report '{report}' is invalid: {}", problems.join("; "))]
    SchemaMismatch {
        report: String,
        problems: Vec<String>,
    },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ReportError {
    #[display("invalid report specification")]
    Spec(SpecError),
    #[display("failed to load input '{input}'")]
    Load { input: String, source: LoadError },
    #[display("failed to analyze configuration '{configuration}'")]
    Analysis {
        configuration: String,
        source: AnalysisError,
    },
    #[display("configuration '{configuration}' selected no rows")]
    EmptySelection { configuration: String },
    #[display("failed to render report")]
    Render(RenderError),
}
