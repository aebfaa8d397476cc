//! Errors raised while reading, writing, or normalizing spec files.

use std::io;
use std::path::PathBuf;

use rulex_lexer::SpecError;

use crate::ExprError;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("cannot read `{path}`: {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON parsed but is not a spec.
    #[error("{0}")]
    Shape(String),
    #[error("rule {index}: invalid handler: {error}")]
    Handler {
        index: usize,
        #[source]
        error: ExprError,
    },
    /// A malformed line in a Yacc-style spec.
    #[error("line {line}: {message}")]
    Line { line: usize, message: String },
    #[error("line {line}: invalid handler: {error}")]
    LineHandler {
        line: usize,
        #[source]
        error: ExprError,
    },
    #[error("rule {index} has a native handler with no source text and cannot be written out")]
    OpaqueHandler { index: usize },
    #[error(transparent)]
    Spec(#[from] SpecError),
}
