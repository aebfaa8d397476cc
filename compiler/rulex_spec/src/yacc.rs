//! Yacc-style line spec syntax.
//!
//! One rule per line, pattern first, handler body after it:
//!
//! ```text
//! %option captureLocations
//! // whitespace
//! /\s+/            return 'WS';
//! /\d+/            { return "NUMBER"; }
//! "=="             EQ_EQ
//! [a-zA-Z_]\w*     IDENT
//! ```
//!
//! A pattern is `/regex/flags`, a quoted literal (matched verbatim), or a
//! bare run of non-whitespace taken as a regex. Blank lines, `%%` section
//! marks, and lines starting with `//` or `#` are skipped.

use rulex_lexer::{Options, RawRule, RawSpec};
use serde_json::Value;

use crate::{expr, FormatError};

/// Parse a Yacc-style spec into a raw spec.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_yacc(text: &str) -> Result<RawSpec, FormatError> {
    let mut rules = Vec::new();
    let mut options = Options::default();

    for (idx, raw_line) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty()
            || trimmed == "%%"
            || trimmed.starts_with("//")
            || trimmed.starts_with('#')
        {
            continue;
        }

        if let Some(directive) = trimmed.strip_prefix('%') {
            option_line(line, directive, &mut options)?;
            continue;
        }

        let (pattern, rest) = split_pattern(trimmed).map_err(|message| FormatError::Line {
            line,
            message: message.to_owned(),
        })?;
        let body = rest.trim();
        if body.is_empty() {
            return Err(FormatError::Line {
                line,
                message: "rule has no handler".to_owned(),
            });
        }
        let handler =
            expr::compile(body).map_err(|error| FormatError::LineHandler { line, error })?;
        tracing::trace!(line, %pattern, "yacc rule");
        rules.push(RawRule::new(pattern, handler));
    }

    Ok(RawSpec::Record { rules, options })
}

/// `%option key[=value]`; a missing value means `true`.
fn option_line(line: usize, directive: &str, options: &mut Options) -> Result<(), FormatError> {
    let (name, rest) = directive
        .split_once(char::is_whitespace)
        .unwrap_or((directive, ""));
    if name != "option" && name != "options" {
        return Err(FormatError::Line {
            line,
            message: format!("unknown directive `%{name}`"),
        });
    }

    for setting in rest.split_whitespace() {
        let (key, value) = match setting.split_once('=') {
            Some((key, value)) => (key, option_value(value)),
            None => (setting, Value::Bool(true)),
        };
        let mut entry = serde_json::Map::new();
        entry.insert(key.to_owned(), value);
        let patch: Options = serde_json::from_value(Value::Object(entry))
            .map_err(|err| FormatError::Line {
                line,
                message: format!("invalid option `{setting}`: {err}"),
            })?;
        options.merge(&patch);
    }
    Ok(())
}

fn option_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
}

/// Split a rule line into its regex source and the remaining handler text.
fn split_pattern(line: &str) -> Result<(String, &str), &'static str> {
    match line.chars().next() {
        Some('/') => slash_pattern(line),
        Some(quote @ ('"' | '\'')) => quoted_pattern(line, quote),
        _ => {
            let end = line.find(char::is_whitespace).unwrap_or(line.len());
            Ok((line[..end].to_owned(), &line[end..]))
        }
    }
}

/// `/regex/flags`. `\/` stands for a literal slash; a `/` inside a
/// character class does not close the pattern.
fn slash_pattern(line: &str) -> Result<(String, &str), &'static str> {
    let mut source = String::new();
    let mut in_class = false;
    let mut chars = line.char_indices().skip(1);
    let close = loop {
        let Some((at, c)) = chars.next() else {
            return Err("unterminated `/pattern/`");
        };
        match c {
            '\\' => match chars.next() {
                Some((_, '/')) => source.push('/'),
                Some((_, escaped)) => {
                    source.push('\\');
                    source.push(escaped);
                }
                None => return Err("unterminated `/pattern/`"),
            },
            '[' => {
                in_class = true;
                source.push(c);
            }
            ']' => {
                in_class = false;
                source.push(c);
            }
            '/' if !in_class => break at,
            _ => source.push(c),
        }
    };

    let after = &line[close + 1..];
    let flags_len = after
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(after.len());
    let flags = &after[..flags_len];
    if let Some(bad) = flags.chars().find(|c| !"imsxuU".contains(*c)) {
        return Err(match bad {
            'g' | 'y' => "flags `g` and `y` have no meaning for a tokenizer rule",
            _ => "unknown regex flag",
        });
    }
    // `u` is the regex crate's default; drop it rather than pass it through.
    let flags: String = flags.chars().filter(|c| *c != 'u').collect();
    let pattern = if flags.is_empty() {
        source
    } else {
        format!("(?{flags}){source}")
    };
    Ok((pattern, &after[flags_len..]))
}

/// A quoted literal, matched verbatim.
fn quoted_pattern(line: &str, quote: char) -> Result<(String, &str), &'static str> {
    let mut literal = String::new();
    let mut chars = line.char_indices().skip(1);
    loop {
        let Some((at, c)) = chars.next() else {
            return Err("unterminated quoted pattern");
        };
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => literal.push('\n'),
                Some((_, 't')) => literal.push('\t'),
                Some((_, 'r')) => literal.push('\r'),
                Some((_, escaped)) => literal.push(escaped),
                None => return Err("unterminated quoted pattern"),
            },
            c if c == quote => {
                return Ok((regex::escape(&literal), &line[at + c.len_utf8()..]));
            }
            c => literal.push(c),
        }
    }
}

#[cfg(test)]
mod tests;
