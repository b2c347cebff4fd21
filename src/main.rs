//! CLI entry point for the layered trait mixer

use clap::Parser;
use layermix::io::cli::{BatchRunner, Cli, exit_code};
use layermix::io::logging;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let mut runner = BatchRunner::new(cli);
    match runner.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(exit_code(&err))
        }
    }
}
