//! Rule specs and their normalization.
//!
//! A raw spec arrives either as a bare ordered list of rules or as a record
//! carrying `rules` and `options`. Normalization compiles every pattern
//! anchored to the start of the remaining input and freezes the rule order;
//! the rule index is the tie-break priority for the rest of the spec's life.

use regex::Regex;
use regex_syntax::ast::parse::Parser;
use regex_syntax::ast::{AssertionKind, Ast, GroupKind};

use crate::{Handler, Options};

/// Anchor prefix added to patterns that do not already carry one.
const ANCHOR: &str = r"\A";

/// A rule as supplied by the caller: pattern source plus handler.
#[derive(Clone, Debug)]
pub struct RawRule {
    pub pattern: String,
    pub handler: Handler,
}

impl RawRule {
    pub fn new(pattern: impl Into<String>, handler: Handler) -> Self {
        RawRule {
            pattern: pattern.into(),
            handler,
        }
    }
}

/// Shorthand for a rule whose handler always yields `label`.
pub fn rule(pattern: impl Into<String>, label: impl Into<String>) -> RawRule {
    RawRule::new(pattern, Handler::label(label))
}

/// The two accepted raw spec shapes.
#[derive(Clone, Debug)]
pub enum RawSpec {
    /// Bare ordered sequence of rules.
    Rules(Vec<RawRule>),
    /// Record with a `rules` sequence and an `options` mapping.
    Record { rules: Vec<RawRule>, options: Options },
}

impl From<Vec<RawRule>> for RawSpec {
    fn from(rules: Vec<RawRule>) -> Self {
        RawSpec::Rules(rules)
    }
}

/// Errors raised while normalizing a spec, before any input is scanned.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    #[error("rule {index}: invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}

/// A normalized rule: anchored, compiled pattern plus handler.
#[derive(Clone, Debug)]
pub struct Rule {
    regex: Regex,
    handler: Handler,
}

impl Rule {
    /// Anchored pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

/// A normalized spec. Immutable once built; safe to share between engines.
#[derive(Clone, Debug, Default)]
pub struct Spec {
    rules: Vec<Rule>,
    options: Options,
}

impl Spec {
    /// Normalize a raw spec: unwrap the record shape, anchor and compile
    /// every pattern, keep order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn normalize(raw: impl Into<RawSpec>) -> Result<Spec, SpecError> {
        let (raw_rules, options) = match raw.into() {
            RawSpec::Rules(rules) => (rules, Options::default()),
            RawSpec::Record { rules, options } => (rules, options),
        };

        let mut rules = Vec::with_capacity(raw_rules.len());
        for (index, raw_rule) in raw_rules.into_iter().enumerate() {
            let anchored = anchor(&raw_rule.pattern);
            let regex = Regex::new(&anchored).map_err(|err| SpecError::InvalidPattern {
                index,
                pattern: raw_rule.pattern.clone(),
                source: Box::new(err),
            })?;
            tracing::trace!(index, pattern = %anchored, "normalized rule");
            rules.push(Rule {
                regex,
                handler: raw_rule.handler,
            });
        }

        tracing::debug!(rules = rules.len(), "spec normalized");
        Ok(Spec { rules, options })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Options the spec was declared with; engine defaults start from these.
    pub fn options(&self) -> &Options {
        &self.options
    }
}

/// Whether `pattern` is already wrapped as `\A(?:...)`.
///
/// Only a wrapper spanning the whole pattern counts: `\A(?:a)|b` and
/// `^a|b` still match away from the start and get wrapped again.
pub fn is_anchored(pattern: &str) -> bool {
    let Ok(Ast::Concat(ref concat)) = Parser::new().parse(pattern) else {
        return false;
    };
    matches!(
        concat.asts.as_slice(),
        [Ast::Assertion(start), Ast::Group(group)]
            if start.kind == AssertionKind::StartText
                && matches!(&group.kind, GroupKind::NonCapturing(flags) if flags.items.is_empty())
    )
}

/// Anchor `pattern` to the start of the remaining input.
///
/// The pattern is wrapped in a non-capturing group so alternations
/// and inline flags keep their meaning and capture-group numbering is
/// unchanged. Already-anchored patterns are returned as-is.
pub fn anchor(pattern: &str) -> String {
    if is_anchored(pattern) {
        return pattern.to_owned();
    }
    // In verbose mode a trailing `#` comment would swallow the closing paren.
    let close = if ends_in_comment(pattern) { "\n)" } else { ")" };
    format!("{ANCHOR}(?:{pattern}{close}")
}

fn ends_in_comment(pattern: &str) -> bool {
    !pattern.ends_with('\n')
        && Parser::new()
            .parse_with_comments(pattern)
            .is_ok_and(|parsed| {
                parsed
                    .comments
                    .last()
                    .is_some_and(|comment| comment.span.end.offset == pattern.len())
            })
}
