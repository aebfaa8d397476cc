//! Handler-expression language.
//!
//! Spec files carry handler bodies as text. Rather than evaluating that text
//! as code, it is parsed into a tiny closed expression grammar:
//!
//! ```text
//! body   := "{" inner "}" | inner
//! inner  := ["return"] [result] [";"]
//! result := "null" | "[" value "," value "]" | value
//! value  := term ("+" term)*
//! term   := atom ("." method)*
//! atom   := STRING | "text" | "yytext" | IDENT | "(" value ")"
//! method := "slice" "(" INT ["," INT] ")"
//!         | "trim" "(" ")" | "toUpperCase" "(" ")" | "toLowerCase" "(" ")"
//! ```
//!
//! `text`/`yytext` is the matched text. Any other bare identifier is a
//! literal label, so `return NUMBER;` and `"NUMBER"` mean the same thing.
//! A pair is `[value, type]`. An empty body or `null` resolves no type.
//! Evaluation is total: it cannot fail, loop, or reach outside the match.

use std::fmt;

use rulex_lexer::{Emit, Handler};

/// What went wrong while compiling a handler body.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExprErrorKind {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid escape `\\{0}` in string literal")]
    InvalidEscape(char),
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
    },
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
    #[error("integer literal out of range")]
    IntegerOverflow,
}

/// A handler-body compile error at a 1-based character column.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("column {column}: {kind}")]
pub struct ExprError {
    pub column: usize,
    pub kind: ExprErrorKind,
}

/// A string-valued expression over the matched text.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Value {
    Text,
    Literal(String),
    Concat(Vec<Value>),
    Slice {
        base: Box<Value>,
        start: i64,
        end: Option<i64>,
    },
    Trim(Box<Value>),
    Upper(Box<Value>),
    Lower(Box<Value>),
}

impl Value {
    fn eval(&self, text: &str) -> String {
        match self {
            Value::Text => text.to_owned(),
            Value::Literal(lit) => lit.clone(),
            Value::Concat(parts) => parts.iter().map(|part| part.eval(text)).collect(),
            Value::Slice { base, start, end } => slice(&base.eval(text), *start, *end),
            Value::Trim(base) => base.eval(text).trim().to_owned(),
            Value::Upper(base) => base.eval(text).to_uppercase(),
            Value::Lower(base) => base.eval(text).to_lowercase(),
        }
    }
}

/// Character-indexed slice; negative bounds count from the end, bounds are
/// clamped, and an inverted range is empty.
fn slice(s: &str, start: i64, end: Option<i64>) -> String {
    let len = i64::try_from(s.chars().count()).unwrap_or(i64::MAX);
    let clamp = |idx: i64| {
        let idx = if idx < 0 { len + idx } else { idx };
        usize::try_from(idx.clamp(0, len)).unwrap_or(0)
    };
    let from = clamp(start);
    let to = clamp(end.unwrap_or(len));
    if from >= to {
        return String::new();
    }
    s.chars().skip(from).take(to - from).collect()
}

/// A compiled handler body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerExpr(Body);

#[derive(Clone, Debug, PartialEq, Eq)]
enum Body {
    Null,
    Type(Value),
    Pair { value: Value, kind: Value },
}

impl HandlerExpr {
    /// Run the expression against matched text.
    pub fn eval(&self, text: &str) -> Option<Emit> {
        match &self.0 {
            Body::Null => None,
            Body::Type(kind) => Some(Emit::Type(kind.eval(text))),
            Body::Pair { value, kind } => Some(Emit::TypeAndValue {
                kind: kind.eval(text),
                value: value.eval(text),
            }),
        }
    }
}

/// Parse a handler body.
pub fn parse(body: &str) -> Result<HandlerExpr, ExprError> {
    let toks = lex(body)?;
    let mut parser = Parser {
        src: body,
        toks,
        idx: 0,
    };
    parser.body().map(HandlerExpr)
}

/// Parse a handler body into a [`Handler`] that remembers its source.
pub fn compile(body: &str) -> Result<Handler, ExprError> {
    let expr = parse(body)?;
    Ok(Handler::from_fn(move |text| expr.eval(text)).with_source(body.trim()))
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    Str(String),
    Int(u64),
    Ident(String),
    Punct(char),
    Eof,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Str(s) => write!(f, "string {s:?}"),
            Tok::Int(n) => write!(f, "integer {n}"),
            Tok::Ident(name) => write!(f, "`{name}`"),
            Tok::Punct(c) => write!(f, "`{c}`"),
            Tok::Eof => f.write_str("end of handler"),
        }
    }
}

/// Token plus its byte offset in the body.
type Spanned = (usize, Tok);

fn column_of(src: &str, offset: usize) -> usize {
    src[..offset.min(src.len())].chars().count() + 1
}

fn lex(src: &str) -> Result<Vec<Spanned>, ExprError> {
    let err = |offset: usize, kind| ExprError {
        column: column_of(src, offset),
        kind,
    };

    let mut toks = Vec::new();
    let mut chars = src.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '"' | '\'' => {
                chars.next();
                let mut lit = String::new();
                loop {
                    let Some((at, ch)) = chars.next() else {
                        return Err(err(start, ExprErrorKind::UnterminatedString));
                    };
                    match ch {
                        ch if ch == c => break,
                        '\\' => {
                            let Some((_, esc)) = chars.next() else {
                                return Err(err(start, ExprErrorKind::UnterminatedString));
                            };
                            lit.push(match esc {
                                'n' => '\n',
                                't' => '\t',
                                'r' => '\r',
                                '0' => '\0',
                                '\\' | '"' | '\'' | '/' => esc,
                                'u' => {
                                    let hex: String =
                                        chars.by_ref().take(4).map(|(_, h)| h).collect();
                                    u32::from_str_radix(&hex, 16)
                                        .ok()
                                        .filter(|_| hex.len() == 4)
                                        .and_then(char::from_u32)
                                        .ok_or_else(|| err(at, ExprErrorKind::InvalidEscape('u')))?
                                }
                                other => {
                                    return Err(err(at, ExprErrorKind::InvalidEscape(other)));
                                }
                            });
                        }
                        ch => lit.push(ch),
                    }
                }
                toks.push((start, Tok::Str(lit)));
            }
            c if c.is_ascii_digit() => {
                let mut end = start;
                while let Some(&(at, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = at + d.len_utf8();
                    chars.next();
                }
                let n = src[start..end]
                    .parse::<u64>()
                    .map_err(|_| err(start, ExprErrorKind::IntegerOverflow))?;
                toks.push((start, Tok::Int(n)));
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut end = start;
                while let Some(&(at, d)) = chars.peek() {
                    if !(d.is_alphanumeric() || d == '_' || d == '$') {
                        break;
                    }
                    end = at + d.len_utf8();
                    chars.next();
                }
                toks.push((start, Tok::Ident(src[start..end].to_owned())));
            }
            '[' | ']' | '(' | ')' | '{' | '}' | ',' | '.' | '+' | '-' | ';' => {
                chars.next();
                toks.push((start, Tok::Punct(c)));
            }
            other => return Err(err(start, ExprErrorKind::UnexpectedChar(other))),
        }
    }
    toks.push((src.len(), Tok::Eof));
    Ok(toks)
}

struct Parser<'a> {
    src: &'a str,
    toks: Vec<Spanned>,
    idx: usize,
}

impl Parser<'_> {
    fn peek(&self) -> &Tok {
        self.toks.get(self.idx).map_or(&Tok::Eof, |(_, tok)| tok)
    }

    fn bump(&mut self) -> Tok {
        let tok = self.peek().clone();
        if self.idx < self.toks.len() {
            self.idx += 1;
        }
        tok
    }

    fn error(&self, expected: &'static str) -> ExprError {
        let offset = self.toks.get(self.idx).map_or(self.src.len(), |(at, _)| *at);
        ExprError {
            column: column_of(self.src, offset),
            kind: ExprErrorKind::Expected {
                expected,
                found: self.peek().to_string(),
            },
        }
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if *self.peek() == Tok::Punct(c) {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char, expected: &'static str) -> Result<(), ExprError> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn eat_ident(&mut self, name: &str) -> bool {
        if matches!(self.peek(), Tok::Ident(ident) if ident == name) {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    fn body(&mut self) -> Result<Body, ExprError> {
        let braced = self.eat_punct('{');
        self.eat_ident("return");

        let body = if self.eat_ident("null") || self.eat_ident("undefined") {
            Body::Null
        } else {
            match self.peek() {
                Tok::Eof | Tok::Punct(';' | '}') => Body::Null,
                Tok::Punct('[') => {
                    self.idx += 1;
                    let value = self.value()?;
                    self.expect_punct(',', "`,` between value and type")?;
                    let kind = self.value()?;
                    self.expect_punct(']', "`]` closing the pair")?;
                    Body::Pair { value, kind }
                }
                _ => Body::Type(self.value()?),
            }
        };

        self.eat_punct(';');
        if braced {
            self.expect_punct('}', "`}` closing the handler")?;
            self.eat_punct(';');
        }
        if *self.peek() != Tok::Eof {
            return Err(self.error("end of handler"));
        }
        Ok(body)
    }

    fn value(&mut self) -> Result<Value, ExprError> {
        let first = self.term()?;
        if *self.peek() != Tok::Punct('+') {
            return Ok(first);
        }
        let mut parts = vec![first];
        while self.eat_punct('+') {
            parts.push(self.term()?);
        }
        Ok(Value::Concat(parts))
    }

    fn term(&mut self) -> Result<Value, ExprError> {
        let mut value = self.atom()?;
        while self.eat_punct('.') {
            value = self.method(value)?;
        }
        Ok(value)
    }

    fn atom(&mut self) -> Result<Value, ExprError> {
        match self.peek() {
            Tok::Str(_) | Tok::Ident(_) => match self.bump() {
                Tok::Str(lit) => Ok(Value::Literal(lit)),
                Tok::Ident(name) if name == "text" || name == "yytext" => Ok(Value::Text),
                Tok::Ident(name) => Ok(Value::Literal(name)),
                _ => Err(self.error("a value")),
            },
            Tok::Punct('(') => {
                self.idx += 1;
                let inner = self.value()?;
                self.expect_punct(')', "`)`")?;
                Ok(inner)
            }
            _ => Err(self.error("a value")),
        }
    }

    fn method(&mut self, base: Value) -> Result<Value, ExprError> {
        let at = self.idx;
        let Tok::Ident(name) = self.bump() else {
            self.idx = at;
            return Err(self.error("a method name"));
        };
        let base = Box::new(base);
        self.expect_punct('(', "`(` after method name")?;
        let value = match name.as_str() {
            "slice" => {
                let start = self.int()?;
                let end = if self.eat_punct(',') {
                    Some(self.int()?)
                } else {
                    None
                };
                Value::Slice { base, start, end }
            }
            "trim" => Value::Trim(base),
            "toUpperCase" => Value::Upper(base),
            "toLowerCase" => Value::Lower(base),
            _ => {
                let (offset, _) = self.toks[at];
                return Err(ExprError {
                    column: column_of(self.src, offset),
                    kind: ExprErrorKind::UnknownMethod(name),
                });
            }
        };
        self.expect_punct(')', "`)` closing the call")?;
        Ok(value)
    }

    fn int(&mut self) -> Result<i64, ExprError> {
        let negative = self.eat_punct('-');
        let at = self.idx;
        let Tok::Int(n) = self.bump() else {
            self.idx = at;
            return Err(self.error("an integer"));
        };
        let n = i64::try_from(n).map_err(|_| {
            let (offset, _) = self.toks[at];
            ExprError {
                column: column_of(self.src, offset),
                kind: ExprErrorKind::IntegerOverflow,
            }
        })?;
        Ok(if negative { -n } else { n })
    }
}
