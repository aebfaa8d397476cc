//! `rulex tokenize`: run a spec over input text and print the tokens.

use std::io::Write;
use std::path::Path;

use rulex_lexer::{Options, Tokenizer};
use rulex_spec::load_spec;

use crate::CliError;

/// Output switches for `tokenize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizeOptions {
    /// Force location capture on, whatever the spec says.
    pub locations: bool,
    /// Emit a JSON array instead of one token per line.
    pub json: bool,
}

/// Tokenize `text` with the spec at `spec_path`, writing tokens to `out`.
///
/// Nothing is written if tokenizing fails; the error carries the
/// diagnostic.
pub fn tokenize_text(
    spec_path: &Path,
    text: &str,
    options: TokenizeOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let spec = load_spec(spec_path)?;
    let mut lexer = Tokenizer::from_spec(spec);
    let overrides = options.locations.then(|| Options::with_locations(true));
    lexer.init(text, overrides.as_ref());

    let tokens = lexer.all_tokens()?;
    tracing::debug!(count = tokens.len(), "tokenized input");

    if options.json {
        serde_json::to_writer_pretty(&mut *out, tokens).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        for token in tokens {
            writeln!(out, "{token}")?;
        }
    }
    Ok(())
}
