use std::{
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use anyhow::Context;
use relperf_report::spec::ReportSpec;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise each `-v` raises the level from
/// `warn` to `info` and then `debug`.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Reads a report spec from a JSON file.
///
/// The spec is only parsed here; `generate_report` validates it.
pub fn read_report_spec_file(path: &Path) -> anyhow::Result<ReportSpec> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open report spec: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse report spec JSON: {}", path.display()))
}
