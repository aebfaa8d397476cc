//! Rule-driven tokenizer engine.
//!
//! A spec is an ordered list of `(pattern, handler)` rules. The engine
//! anchors every pattern to the current position, tries the rules in order,
//! and hands the first match to its handler, which names the token type and
//! may rewrite the token value.
//!
//! ```
//! use rulex_lexer::{rule, Tokenizer};
//!
//! let mut lexer = Tokenizer::new(vec![
//!     rule(r"\s+", "WS"),
//!     rule(r"\d+", "NUMBER"),
//!     rule(r"\w+", "WORD"),
//! ])?;
//! lexer.init("Score 250", None);
//!
//! let kinds: Vec<_> = lexer.all_tokens()?.iter().map(|t| t.kind.as_str()).collect();
//! assert_eq!(kinds, ["WORD", "WS", "NUMBER"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! This crate has no knowledge of spec file formats; see `rulex_spec`.

mod handler;
mod lex_error;
mod options;
mod spec;
mod token;
mod tokenizer;

pub use handler::{Emit, Handler};
pub use lex_error::{LexError, LexErrorKind};
pub use options::Options;
pub use spec::{anchor, is_anchored, rule, RawRule, RawSpec, Rule, Spec, SpecError};
pub use token::{Location, Token};
pub use tokenizer::{Tokenizer, Tokens};
