//! Rule handlers.
//!
//! A handler decides what a matched substring becomes. It returns an
//! [`Emit`] naming the token type (and optionally a rewritten value), or
//! `None` when the text does not resolve to a token type.

use std::fmt;
use std::sync::Arc;

/// Result of running a handler on matched text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Emit {
    /// Token type only. The token value is the raw matched text.
    Type(String),
    /// Token type plus a rewritten value (quotes stripped, escapes cooked).
    TypeAndValue { kind: String, value: String },
}

impl Emit {
    /// The token type this result names.
    pub fn kind(&self) -> &str {
        match self {
            Emit::Type(kind) | Emit::TypeAndValue { kind, .. } => kind,
        }
    }

    /// Split into `(kind, value)`, falling back to `matched` for the value.
    pub(crate) fn into_parts(self, matched: &str) -> (String, String) {
        match self {
            Emit::Type(kind) => (kind, matched.to_owned()),
            Emit::TypeAndValue { kind, value } => (kind, value),
        }
    }
}

type HandlerFn = dyn Fn(&str) -> Option<Emit> + Send + Sync;

/// Shared, immutable handler callable.
///
/// Cloning is cheap (`Arc`). A handler may remember the source text it was
/// compiled from so a normalized spec can be written back out.
#[derive(Clone)]
pub struct Handler {
    func: Arc<HandlerFn>,
    source: Option<Arc<str>>,
}

impl Handler {
    /// Wrap an arbitrary closure.
    pub fn from_fn<F>(func: F) -> Self
    where
        F: Fn(&str) -> Option<Emit> + Send + Sync + 'static,
    {
        Handler {
            func: Arc::new(func),
            source: None,
        }
    }

    /// A handler that always yields `kind`, keeping the matched text as value.
    ///
    /// Its source is the quoted label, which the handler-expression
    /// language in `rulex_spec` reads back as the same constant handler.
    pub fn label(kind: impl Into<String>) -> Self {
        let kind: String = kind.into();
        let source = serde_json::Value::String(kind.clone()).to_string();
        Handler {
            func: Arc::new(move |_| Some(Emit::Type(kind.clone()))),
            source: Some(source.into()),
        }
    }

    /// Attach the source text this handler was compiled from.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Source text, if the handler was built from one.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Run the handler on matched text.
    #[inline]
    pub fn call(&self, text: &str) -> Option<Emit> {
        (self.func)(text)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => f.debug_tuple("Handler").field(source).finish(),
            None => f.write_str("Handler(<fn>)"),
        }
    }
}
