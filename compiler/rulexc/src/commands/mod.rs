//! Command handlers for the rulex CLI.
//!
//! Each submodule implements one subcommand against a generic writer.
//! Shared file helpers live here in the module root.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::cli::Command;
use crate::CliError;

mod generate;
mod normalize;
mod tokenize;

pub use generate::{generate_module, render_module};
pub use normalize::normalize_spec;
pub use tokenize::{tokenize_text, TokenizeOptions};

/// Dispatch a parsed command, writing to stdout or the requested file.
pub fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Tokenize {
            spec,
            input,
            locations,
            json,
        } => {
            let text = match &input {
                Some(path) => read_file(path)?,
                None => io::read_to_string(io::stdin()).map_err(|error| CliError::Read {
                    path: "<stdin>".into(),
                    error,
                })?,
            };
            let options = TokenizeOptions { locations, json };
            let mut out = io::stdout().lock();
            tokenize_text(&spec, &text, options, &mut out)
        }
        Command::Normalize { spec, output } => {
            with_output(output.as_deref(), |out| normalize_spec(&spec, out))
        }
        Command::Generate { spec, output, name } => {
            with_output(output.as_deref(), |out| generate_module(&spec, &name, out))
        }
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|error| CliError::Read {
        path: path.to_path_buf(),
        error,
    })
}

/// Run `write` against `path`, or stdout when no path is given.
fn with_output<F>(path: Option<&Path>, write: F) -> Result<(), CliError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), CliError>,
{
    match path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write(&mut out)?;
            out.flush()?;
        }
        None => write(&mut io::stdout().lock())?,
    }
    Ok(())
}
