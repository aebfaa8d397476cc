#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use rulex_lexer::{Emit, Tokenizer};

use super::*;

#[test]
fn bare_array_spec() {
    let raw = parse_json(r#"[["\\s+", "WS"], ["\\d+", "return 'NUMBER';"]]"#).unwrap();
    let RawSpec::Rules(rules) = raw else {
        panic!("expected bare rules");
    };
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].pattern, r"\s+");
    assert_eq!(rules[1].handler.call("7"), Some(Emit::Type("NUMBER".into())));
}

#[test]
fn record_spec_with_options() {
    let raw = parse_json(
        r#"{
            "rules": [["\"[^\"]*\"", "[yytext.slice(1, -1), 'STRING']"]],
            "options": { "captureLocations": true, "name": "strings" }
        }"#,
    )
    .unwrap();
    let RawSpec::Record { rules, options } = raw else {
        panic!("expected record");
    };
    assert!(options.capture_locations());
    assert_eq!(options.extra.get("name"), Some(&Value::from("strings")));
    assert_eq!(
        rules[0].handler.call("\"hi\""),
        Some(Emit::TypeAndValue {
            kind: "STRING".into(),
            value: "hi".into()
        })
    );
}

#[test]
fn parsed_spec_drives_a_tokenizer() {
    let raw = parse_json(r#"[["\\s+", "WS"], ["\\d+", "NUMBER"], ["\\w+", "WORD"]]"#).unwrap();
    let mut lexer = Tokenizer::new(raw).unwrap();
    lexer.init("Score 250", None);
    let kinds: Vec<_> = lexer
        .all_tokens()
        .unwrap()
        .iter()
        .map(|t| t.kind.clone())
        .collect();
    assert_eq!(kinds, vec!["WORD", "WS", "NUMBER"]);
}

#[test]
fn missing_options_default() {
    let raw = parse_json(r#"{ "rules": [], "options": null }"#).unwrap();
    let RawSpec::Record { rules, options } = raw else {
        panic!("expected record");
    };
    assert!(rules.is_empty());
    assert_eq!(options, Options::default());
}

#[test]
fn shape_errors_are_descriptive() {
    let cases = [
        ("42", "spec must be an array of rules or an object with a `rules` array"),
        (r#"{ "options": {} }"#, "spec object has no `rules` array"),
        (r#"{ "rules": {} }"#, "`rules` must be an array"),
        (r#"{ "rules": [], "options": [] }"#, "`options` must be an object"),
        (r#"["a"]"#, "rule 0 must be a [pattern, handler] pair"),
        (r#"[["a", "A"], ["b"]]"#, "rule 1 must have exactly two elements"),
        (r#"[["a", 1]]"#, "rule 0: pattern and handler must both be strings"),
    ];
    for (text, message) in cases {
        let err = parse_json(text).unwrap_err();
        assert_eq!(err.to_string(), message, "input: {text}");
    }
}

#[test]
fn bad_handler_names_rule() {
    let err = parse_json(r#"[["a", "A"], ["b", "text.eval()"]]"#).unwrap_err();
    assert!(matches!(err, FormatError::Handler { index: 1, .. }));
    assert_eq!(
        err.to_string(),
        "rule 1: invalid handler: column 6: unknown method `eval`"
    );
}

#[test]
fn malformed_json_is_reported() {
    assert!(matches!(parse_json("[["), Err(FormatError::Json(_))));
}
