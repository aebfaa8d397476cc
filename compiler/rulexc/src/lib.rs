//! Library half of the `rulex` command-line tool.
//!
//! `main.rs` only parses arguments; command handlers live here so tests can
//! drive them with in-memory writers.

pub mod cli;
pub mod commands;

use std::io;
use std::path::PathBuf;
use std::sync::Once;

use rulex_lexer::LexError;
use rulex_spec::FormatError;

/// Errors surfaced to the user by a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Spec(#[from] FormatError),
    /// Display is the full caret diagnostic.
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("cannot read `{path}`: {error}")]
    Read {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),
    #[error("`{0}` is not a valid Rust identifier")]
    InvalidName(String),
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=rulex_lexer=trace` or `RUST_LOG=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
