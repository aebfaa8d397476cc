//! JSON spec syntax.
//!
//! Either a bare array of `[pattern, handler]` pairs or an object
//! `{ "rules": [...], "options": {...} }`. Handlers are handler-expression
//! source strings (see [`crate::expr`]).

use rulex_lexer::{Options, RawRule, RawSpec};
use serde_json::Value;

use crate::{expr, FormatError};

/// Parse a JSON spec into a raw spec.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_json(text: &str) -> Result<RawSpec, FormatError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(items) => Ok(RawSpec::Rules(rules(items)?)),
        Value::Object(mut map) => {
            let rules = match map.remove("rules") {
                Some(Value::Array(items)) => rules(items)?,
                Some(_) => return Err(shape("`rules` must be an array")),
                None => return Err(shape("spec object has no `rules` array")),
            };
            let options = match map.remove("options") {
                Some(Value::Null) | None => Options::default(),
                Some(value @ Value::Object(_)) => serde_json::from_value(value)?,
                Some(_) => return Err(shape("`options` must be an object")),
            };
            Ok(RawSpec::Record { rules, options })
        }
        _ => Err(shape(
            "spec must be an array of rules or an object with a `rules` array",
        )),
    }
}

fn rules(items: Vec<Value>) -> Result<Vec<RawRule>, FormatError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| json_rule(index, item))
        .collect()
}

fn json_rule(index: usize, item: Value) -> Result<RawRule, FormatError> {
    let Value::Array(pair) = item else {
        return Err(shape(format!("rule {index} must be a [pattern, handler] pair")));
    };
    let [Value::String(pattern), Value::String(body)] = <[Value; 2]>::try_from(pair)
        .map_err(|_| shape(format!("rule {index} must have exactly two elements")))?
    else {
        return Err(shape(format!(
            "rule {index}: pattern and handler must both be strings"
        )));
    };
    let handler = expr::compile(&body).map_err(|error| FormatError::Handler { index, error })?;
    Ok(RawRule::new(pattern, handler))
}

fn shape(message: impl Into<String>) -> FormatError {
    FormatError::Shape(message.into())
}

#[cfg(test)]
mod tests;
