//! `tally` command-line entry point.
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`, e.g.
//! `RUST_LOG=info,tally=debug`.

mod args;

use std::process::ExitCode;

use clap::Parser;
use tally::{Tally, TallyError, render};

use crate::args::Cli;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<(), TallyError> {
    let cfg = cli.tally_config()?;
    let tally = cli
        .sources()?
        .into_iter()
        .fold(Tally::builder(), |b, s| b.with_source(s))
        .config(cfg)
        .build()?;

    let analysis = tally.run()?;

    render::write_outputs(
        &analysis,
        &tally.config().chart,
        &cli.output,
        cli.report.as_deref(),
    )?;
    tracing::info!(
        series = analysis.series.len(),
        output = %cli.output.display(),
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(data_error = e.is_data_error(), "run aborted");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
