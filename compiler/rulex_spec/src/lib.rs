//! Spec file formats for the rulex tokenizer.
//!
//! Two surface syntaxes are read into a [`rulex_lexer::RawSpec`]:
//!
//! - JSON: `[[pattern, handler], ...]` or `{ "rules": [...], "options": {...} }`
//! - Yacc-style lines: `/pattern/  handler`
//!
//! Handler bodies are written in a small expression language (see
//! [`expr`]) and compiled into ordinary handlers; nothing in a spec file is
//! ever executed as code. A normalized spec can be written back as JSON.

pub mod expr;

mod error;
mod format;
mod json;
mod serialize;
mod yacc;

pub use error::FormatError;
pub use expr::{compile, ExprError, ExprErrorKind, HandlerExpr};
pub use format::{load_spec, parse_spec, SpecFormat};
pub use json::parse_json;
pub use serialize::{spec_to_json, spec_to_string};
pub use yacc::parse_yacc;
