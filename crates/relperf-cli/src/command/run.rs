use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use relperf_render::table::TableStyle;
use relperf_report::spec::ReportSpec;
use tracing::info;

use crate::{catalog, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportOutputArg {
    /// Directory containing the result files named by the report
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Save the chart to this path (.svg)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Table output style: console or latex
    #[arg(long, default_value = "console")]
    pub format: TableStyle,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct RunArg {
    /// Name of the built-in report (see `relperf list`)
    pub name: String,

    #[clap(flatten)]
    pub output: ReportOutputArg,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct RunSpecArg {
    /// Path to the report spec JSON file
    pub spec: PathBuf,

    #[clap(flatten)]
    pub output: ReportOutputArg,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let entry = catalog::find(&arg.name).with_context(|| {
        format!(
            "Unknown report '{}', expected one of: {}",
            arg.name,
            catalog::names().join(", ")
        )
    })?;
    run_report(&entry.spec(), &arg.output)
}

pub(crate) fn run_spec(arg: &RunSpecArg) -> anyhow::Result<()> {
    let spec = util::read_report_spec_file(&arg.spec)?;
    run_report(&spec, &arg.output)
}

fn run_report(spec: &ReportSpec, output: &ReportOutputArg) -> anyhow::Result<()> {
    let report = relperf_report::generate_report(spec, &output.data_dir)
        .with_context(|| format!("Failed to generate report '{}'", spec.name))?;

    let tables = report
        .tables
        .iter()
        .map(|table| table.render(output.format))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to render tables of report '{}'", spec.name))?;

    match (&report.chart, &output.chart) {
        (Some(chart), Some(path)) => {
            chart
                .save(path)
                .with_context(|| format!("Failed to save chart: {}", path.display()))?;
            eprintln!("Chart saved to {}", path.display());
        }
        (Some(_), None) => info!(report = %spec.name, "no --chart path given, chart not saved"),
        (None, Some(path)) => {
            anyhow::bail!(
                "Report '{}' has no chart to save to {}",
                spec.name,
                path.display()
            );
        }
        (None, None) => {}
    }

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{table}");
    }
    Ok(())
}
