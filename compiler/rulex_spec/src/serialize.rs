//! Writing a normalized spec back out as JSON.
//!
//! The output is the record form of the JSON syntax with anchored
//! patterns, so reading it back yields the same rules in the same order.
//! Every handler must carry its source text.

use rulex_lexer::Spec;
use serde_json::{json, Value};

use crate::FormatError;

/// The normalized spec as a JSON value.
pub fn spec_to_json(spec: &Spec) -> Result<Value, FormatError> {
    let rules = spec
        .rules()
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            let source = rule
                .handler()
                .source()
                .ok_or(FormatError::OpaqueHandler { index })?;
            Ok(json!([rule.pattern(), source]))
        })
        .collect::<Result<Vec<_>, FormatError>>()?;

    Ok(json!({
        "rules": rules,
        "options": serde_json::to_value(spec.options())?,
    }))
}

/// The normalized spec as pretty-printed JSON text.
pub fn spec_to_string(spec: &Spec) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&spec_to_json(spec)?)?)
}
