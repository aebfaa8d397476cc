//! Tokenizer errors.
//!
//! Every error is fatal to the current run. The rendered diagnostic shows
//! the offending source line with a caret under the failure column,
//! followed by a one-line message.

use std::fmt::Write;

/// What went wrong at the failure position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// No rule matched here, or the winning rule's handler resolved no
    /// token type. `found` is the next character in the first case and the
    /// matched text in the second, where `rule` names the winning rule.
    UnexpectedToken { found: String, rule: Option<usize> },
    /// A rule matched the empty string, which would stall the cursor.
    EmptyMatch { rule: usize },
}

/// A positioned tokenizer error with its rendered diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{diagnostic}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset of the failure position.
    pub offset: usize,
    /// 1-based line.
    pub line: u32,
    /// 0-based column, in characters.
    pub column: u32,
    diagnostic: String,
}

impl LexError {
    /// No rule matched at `offset`; `found` is the character there.
    pub(crate) fn unexpected_char(
        source: &str,
        offset: usize,
        line: u32,
        column: u32,
        found: char,
    ) -> Self {
        Self::build(
            source,
            offset,
            line,
            column,
            LexErrorKind::UnexpectedToken {
                found: found.to_string(),
                rule: None,
            },
        )
    }

    /// Rule `rule` matched `matched` but its handler resolved no token type.
    pub(crate) fn unresolved(
        source: &str,
        offset: usize,
        line: u32,
        column: u32,
        rule: usize,
        matched: &str,
    ) -> Self {
        Self::build(
            source,
            offset,
            line,
            column,
            LexErrorKind::UnexpectedToken {
                found: matched.to_owned(),
                rule: Some(rule),
            },
        )
    }

    pub(crate) fn empty_match(
        source: &str,
        offset: usize,
        line: u32,
        column: u32,
        rule: usize,
    ) -> Self {
        Self::build(source, offset, line, column, LexErrorKind::EmptyMatch { rule })
    }

    fn build(source: &str, offset: usize, line: u32, column: u32, kind: LexErrorKind) -> Self {
        let message = kind.message(line, column);
        let diagnostic = render(source, line, column, &message);
        LexError {
            kind,
            offset,
            line,
            column,
            diagnostic,
        }
    }

    /// The one-line message, without source context.
    pub fn message(&self) -> String {
        self.kind.message(self.line, self.column)
    }

    /// Full diagnostic: source line, caret, message.
    pub fn diagnostic(&self) -> &str {
        &self.diagnostic
    }
}

impl LexErrorKind {
    fn message(&self, line: u32, column: u32) -> String {
        match self {
            LexErrorKind::UnexpectedToken { found, .. } => {
                format!("Unexpected token: \"{found}\" at {line}:{column}")
            }
            LexErrorKind::EmptyMatch { rule } => {
                format!("Empty match: rule {rule} matched no input at {line}:{column}")
            }
        }
    }
}

/// Render `message` under the source line it points into.
///
/// The line is found by splitting the whole source on `\n`. When it cannot
/// be found only the message is produced.
fn render(source: &str, line: u32, column: u32, message: &str) -> String {
    let source_line = (line as usize)
        .checked_sub(1)
        .and_then(|idx| source.split('\n').nth(idx));

    let mut out = String::new();
    if let Some(text) = source_line {
        let text = text.strip_suffix('\r').unwrap_or(text);
        let _ = writeln!(out, "{text}");
        let _ = writeln!(out, "{:width$}^", "", width = column as usize);
    }
    out.push_str(message);
    out
}
