use anyhow::Context;
use brc_processor::cli::{run, Cli};
use brc_processor::utils::init_logging;
use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .context("failed to set up logging")?;

    let code = run(cli).context("brc-processor run failed")?;
    Ok(code)
}
