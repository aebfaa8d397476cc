//! The tokenizer engine.
//!
//! An explicit pull-based state machine over one input string. Each
//! [`Tokenizer::next_token`] call runs one full step: match, handler,
//! location bookkeeping. Nothing is produced ahead of time.
//!
//! # Matching
//!
//! Rules are tried in spec order against the remaining input. The first
//! rule whose anchored pattern matches wins, even if a later rule would
//! match a longer substring. A failed step ends the run: the scan state
//! stays at the failure position and every later step reports the same
//! error until the next `init`/`reset`.

use std::iter::FusedIterator;
use std::sync::Arc;

use crate::{LexError, Location, Options, RawSpec, Spec, SpecError, Token};

/// Mutable scan position for one input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScanState {
    /// Byte offset of the next unread byte.
    cursor: usize,
    /// 1-based line of `cursor`.
    line: u32,
    /// 0-based character column of `cursor`.
    column: u32,
    /// Byte offset where the current line begins.
    line_begin: usize,
}

impl ScanState {
    const START: ScanState = ScanState {
        cursor: 0,
        line: 1,
        column: 0,
        line_begin: 0,
    };

    /// Consume `len` bytes of `input` at the cursor and return the span
    /// they cover.
    ///
    /// Newlines inside the consumed text bump the line and move
    /// `line_begin` past them, so multi-line tokens end on the right line.
    fn advance(&mut self, input: &str, len: usize) -> Location {
        let start_offset = self.cursor;
        let start_line = self.line;
        let start_column = self.column;
        let end_offset = start_offset + len;
        let consumed = &input.as_bytes()[start_offset..end_offset];

        let mut saw_newline = false;
        for idx in memchr::memchr_iter(b'\n', consumed) {
            self.line += 1;
            self.line_begin = start_offset + idx + 1;
            saw_newline = true;
        }

        self.column = if saw_newline {
            char_count(&input[self.line_begin..end_offset])
        } else {
            self.column + char_count(&input[start_offset..end_offset])
        };
        self.cursor = end_offset;

        Location {
            start_offset,
            end_offset,
            start_line,
            end_line: self.line,
            start_column,
            end_column: self.column,
        }
    }
}

#[inline]
fn char_count(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

/// Rule-driven tokenizer.
///
/// Built once per spec and rebound to any number of inputs with
/// [`init`](Self::init). The spec is shared and never changes.
#[derive(Debug)]
pub struct Tokenizer {
    spec: Arc<Spec>,
    options: Options,
    input: String,
    state: ScanState,
    /// Set once the input is exhausted.
    finished: bool,
    /// The error that ended this run, replayed until `init`/`reset`.
    failed: Option<LexError>,
    /// Cached result of [`all_tokens`](Self::all_tokens).
    drained: Option<Vec<Token>>,
}

impl Tokenizer {
    /// Normalize `raw` and build a tokenizer over it.
    pub fn new(raw: impl Into<RawSpec>) -> Result<Self, SpecError> {
        Ok(Self::from_spec(Spec::normalize(raw)?))
    }

    /// Build a tokenizer over an already normalized spec.
    ///
    /// Engine options start from the spec's declared options.
    pub fn from_spec(spec: impl Into<Arc<Spec>>) -> Self {
        let spec = spec.into();
        let options = spec.options().clone();
        Tokenizer {
            spec,
            options,
            input: String::new(),
            state: ScanState::START,
            finished: false,
            failed: None,
            drained: None,
        }
    }

    /// Bind to a new input and rewind to its start.
    ///
    /// `options`, when given, are merged over the current options and stay
    /// in effect for later runs. Any in-flight production is discarded.
    pub fn init(&mut self, input: impl AsRef<str>, options: Option<&Options>) {
        self.input.clear();
        self.input.push_str(input.as_ref());
        if let Some(options) = options {
            self.options.merge(options);
        }
        self.rewind();
        tracing::debug!(
            len = self.input.len(),
            capture_locations = self.options.capture_locations(),
            "tokenizer bound to input"
        );
    }

    /// Restart over the current input with the current options.
    pub fn reset(&mut self) {
        self.rewind();
    }

    fn rewind(&mut self) {
        self.state = ScanState::START;
        self.finished = false;
        self.failed = None;
        self.drained = None;
    }

    /// `true` while the cursor has not reached the end of input.
    ///
    /// Does not promise that the next step will succeed.
    pub fn has_more_tokens(&self) -> bool {
        self.state.cursor < self.input.len()
    }

    /// Produce the next token.
    ///
    /// Returns `Ok(None)` once the input is exhausted. An error is fatal
    /// to the run: later calls return the same error until the next
    /// `init`/`reset`.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if self.finished || !self.has_more_tokens() {
            self.finished = true;
            return Ok(None);
        }

        let state = self.state;
        let rest = &self.input[state.cursor..];

        let winner = self.spec.rules().iter().enumerate().find_map(|(index, rule)| {
            rule.regex()
                .find(rest)
                .filter(|found| found.start() == 0)
                .map(|found| (index, rule, found.as_str()))
        });

        let Some((index, rule, matched)) = winner else {
            let found = rest.chars().next().unwrap_or('\0');
            return Err(self.fail(LexError::unexpected_char(
                &self.input,
                state.cursor,
                state.line,
                state.column,
                found,
            )));
        };

        if matched.is_empty() {
            let err = LexError::empty_match(
                &self.input,
                state.cursor,
                state.line,
                state.column,
                index,
            );
            return Err(self.fail(err));
        }

        let Some(emit) = rule.handler().call(matched) else {
            let err = LexError::unresolved(
                &self.input,
                state.cursor,
                state.line,
                state.column,
                index,
                matched,
            );
            return Err(self.fail(err));
        };

        let len = matched.len();
        tracing::trace!(rule = index, kind = emit.kind(), len, "token");
        let (kind, value) = emit.into_parts(matched);
        let loc = self.state.advance(&self.input, len);

        let token = Token::new(kind, value);
        Ok(Some(if self.options.capture_locations() {
            token.with_loc(loc)
        } else {
            token
        }))
    }

    fn fail(&mut self, err: LexError) -> LexError {
        self.failed = Some(err.clone());
        err
    }

    /// Drain the rest of production into a list.
    ///
    /// The list is cached: calling again without an intervening
    /// `init`/`reset` returns the same tokens without scanning. Tokens
    /// already pulled with [`next_token`](Self::next_token) are not included.
    /// A failed run is never cached; every call returns its error.
    pub fn all_tokens(&mut self) -> Result<&[Token], LexError> {
        if self.drained.is_none() {
            let mut tokens = Vec::new();
            while let Some(token) = self.next_token()? {
                tokens.push(token);
            }
            self.drained = Some(tokens);
        }
        Ok(self.drained.get_or_insert_with(Vec::new).as_slice())
    }

    /// The lazy token sequence.
    ///
    /// Finite and single-pass: it shares this tokenizer's scan state, so
    /// iterating it advances the tokenizer and it cannot be restarted
    /// without [`reset`](Self::reset).
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens {
            tokenizer: self,
            done: false,
        }
    }

    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    /// Shared handle to the spec, for building sibling tokenizers.
    pub fn shared_spec(&self) -> Arc<Spec> {
        Arc::clone(&self.spec)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset of the next unread byte.
    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    /// 1-based line of the cursor.
    pub fn current_line(&self) -> u32 {
        self.state.line
    }

    /// 0-based character column of the cursor.
    pub fn current_column(&self) -> u32 {
        self.state.column
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Merge `options` over the current options.
    pub fn set_options(&mut self, options: &Options) {
        self.options.merge(options);
    }
}

/// Single-pass iterator over a tokenizer's remaining tokens.
///
/// Yields `Err` at most once, then ends.
#[derive(Debug)]
pub struct Tokens<'a> {
    tokenizer: &'a mut Tokenizer,
    done: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.tokenizer.next_token().transpose();
        self.done = !matches!(item, Some(Ok(_)));
        item
    }
}

impl FusedIterator for Tokens<'_> {}
