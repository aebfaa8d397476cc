//! rulex CLI

use std::process::ExitCode;

use clap::Parser;
use rulexc::cli::Cli;
use rulexc::commands::run;
use rulexc::{init_tracing, CliError};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Lex(err)) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
