//! Spec format selection and loading.

use std::fs;
use std::path::Path;

use rulex_lexer::{RawSpec, Spec};

use crate::{parse_json, parse_yacc, FormatError};

/// Surface syntax of a spec file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecFormat {
    Json,
    Yacc,
}

impl SpecFormat {
    /// Format implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(SpecFormat::Json),
            "l" | "lex" | "y" => Some(SpecFormat::Yacc),
            _ => None,
        }
    }

    /// Guess the format from content: JSON specs open with `[` or `{`.
    pub fn sniff(text: &str) -> Self {
        match text.trim_start().chars().next() {
            Some('[' | '{') => SpecFormat::Json,
            _ => SpecFormat::Yacc,
        }
    }
}

/// Parse spec text in the given format.
pub fn parse_spec(text: &str, format: SpecFormat) -> Result<RawSpec, FormatError> {
    match format {
        SpecFormat::Json => parse_json(text),
        SpecFormat::Yacc => parse_yacc(text),
    }
}

/// Read, parse, and normalize a spec file.
///
/// The format comes from the extension, falling back to sniffing.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn load_spec(path: &Path) -> Result<Spec, FormatError> {
    let text = fs::read_to_string(path).map_err(|error| FormatError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    let format = SpecFormat::from_path(path).unwrap_or_else(|| SpecFormat::sniff(&text));
    tracing::debug!(?format, "loading spec");
    Ok(Spec::normalize(parse_spec(&text, format)?)?)
}
