//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rulex")]
#[command(about = "Rule-driven tokenizer: tokenize input, normalize specs, generate modules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Tokenize a file (or stdin) with a spec
    Tokenize {
        /// Spec file (.json, or Yacc-style .l/.lex/.y)
        spec: PathBuf,

        /// Input file; reads stdin when omitted
        input: Option<PathBuf>,

        /// Attach offset/line/column spans to tokens
        #[arg(short, long)]
        locations: bool,

        /// Print tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Write the normalized spec as JSON
    Normalize {
        /// Spec file
        spec: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a Rust module that builds a tokenizer for the spec
    Generate {
        /// Spec file
        spec: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the generated constructor function
        #[arg(long, default_value = "tokenizer")]
        name: String,
    },
}
