use std::io::{self, Write as _};

use anyhow::Context;
use clap::Args;

use crate::catalog;

#[derive(Debug, Clone, Args)]
pub(crate) struct PrintSpecArg {
    /// Name of the built-in report (see `relperf list`)
    pub name: String,
}

pub(crate) fn run(arg: &PrintSpecArg) -> anyhow::Result<()> {
    let entry = catalog::find(&arg.name)
        .with_context(|| format!("Unknown report '{}'", arg.name))?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &entry.spec())
        .context("Failed to write JSON to stdout")?;
    writeln!(stdout).context("Failed to write newline after JSON to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}
