use clap::{Parser, Subcommand};

use crate::util;

use self::{
    print_spec::PrintSpecArg,
    run::{RunArg, RunSpecArg},
};

mod list;
mod print_spec;
mod run;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the built-in reports
    List,
    /// Run a built-in report
    Run(#[clap(flatten)] RunArg),
    /// Run a report described by a JSON spec file
    RunSpec(#[clap(flatten)] RunSpecArg),
    /// Print a built-in report as a JSON spec
    PrintSpec(#[clap(flatten)] PrintSpecArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::init_tracing(args.verbose);
    match args.mode {
        Mode::List => list::run(),
        Mode::Run(arg) => run::run(&arg)?,
        Mode::RunSpec(arg) => run::run_spec(&arg)?,
        Mode::PrintSpec(arg) => print_spec::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use relperf_render::table::TableStyle;

    use super::*;

    #[test]
    fn test_parse_run() {
        let args = CommandArgs::try_parse_from([
            "relperf",
            "-vv",
            "run",
            "no-props-delete",
            "--data-dir",
            "results",
            "--chart",
            "delete.svg",
            "--format",
            "latex",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        let Mode::Run(arg) = args.mode else {
            panic!("expected run, got {:?}", args.mode);
        };
        assert_eq!(arg.name, "no-props-delete");
        assert_eq!(arg.output.data_dir.to_str(), Some("results"));
        assert_eq!(arg.output.format, TableStyle::Latex);
    }

    #[test]
    fn test_parse_defaults() {
        let args = CommandArgs::try_parse_from(["relperf", "run-spec", "spec.json"]).unwrap();
        let Mode::RunSpec(arg) = args.mode else {
            panic!("expected run-spec, got {:?}", args.mode);
        };
        assert_eq!(arg.output.data_dir.to_str(), Some("."));
        assert_eq!(arg.output.format, TableStyle::Console);
        assert!(arg.output.chart.is_none());
    }
}
