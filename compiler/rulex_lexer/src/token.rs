//! Token records produced by the tokenizer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Half-open source span `[start_offset, end_offset)` with line/column ends.
///
/// Offsets are byte offsets into the input. Lines are 1-based; columns are
/// 0-based character counts from the start of their line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: u32,
    pub end_line: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl Location {
    /// Length of the covered span in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_line, self.start_column, self.end_line, self.end_column
        )
    }
}

/// A typed, valued unit of lexical output.
///
/// `loc` is present only when location capture was enabled for the run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<Location>,
}

impl Token {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Token {
            kind: kind.into(),
            value: value.into(),
            loc: None,
        }
    }

    #[must_use]
    pub fn with_loc(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.value)?;
        if let Some(loc) = &self.loc {
            write!(f, " @ {loc}")?;
        }
        Ok(())
    }
}
