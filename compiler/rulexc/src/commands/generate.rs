//! `rulex generate`: emit a standalone Rust module for a spec.
//!
//! The module embeds the normalized spec as JSON and exposes one
//! constructor that rebuilds a tokenizer from it through `rulex_spec`.

use std::io::Write;
use std::path::Path;

use rulex_spec::{load_spec, spec_to_string};

use crate::CliError;

pub fn generate_module(spec_path: &Path, name: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let spec = load_spec(spec_path)?;
    let json = spec_to_string(&spec)?;
    let origin = spec_path
        .file_name()
        .map_or_else(|| spec_path.display().to_string(), |f| f.to_string_lossy().into_owned());
    out.write_all(render_module(&origin, name, &json)?.as_bytes())?;
    Ok(())
}

/// Render the module text. `name` must be a plain Rust identifier.
pub fn render_module(origin: &str, name: &str, json: &str) -> Result<String, CliError> {
    if !is_identifier(name) {
        return Err(CliError::InvalidName(name.to_owned()));
    }
    let hashes = "#".repeat(raw_string_hashes(json));
    Ok(format!(
        "\
// Generated by `rulex generate` from {origin}. Do not edit.

use rulex_lexer::{{Spec, Tokenizer}};
use rulex_spec::{{parse_json, FormatError}};

/// Normalized spec, as written by `rulex normalize`.
pub const SPEC_JSON: &str = r{hashes}\"{json}\"{hashes};

/// Build a tokenizer for this spec.
pub fn {name}() -> Result<Tokenizer, FormatError> {{
    let spec = Spec::normalize(parse_json(SPEC_JSON)?)?;
    Ok(Tokenizer::from_spec(spec))
}}
"
    ))
}

/// Number of `#` needed so `text` cannot close the raw string early.
fn raw_string_hashes(text: &str) -> usize {
    let mut longest = 0;
    for (idx, _) in text.match_indices('"') {
        let run = text[idx + 1..].chars().take_while(|c| *c == '#').count();
        longest = longest.max(run);
    }
    longest + 1
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && name != "_"
}
