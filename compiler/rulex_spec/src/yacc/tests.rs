#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use rulex_lexer::{Emit, Tokenizer};

use super::*;

fn rules_of(raw: RawSpec) -> Vec<RawRule> {
    match raw {
        RawSpec::Rules(rules) | RawSpec::Record { rules, .. } => rules,
    }
}

#[test]
fn parses_all_pattern_forms() {
    let raw = parse_yacc(
        r#"
        // comment
        # another comment
        %%
        /\s+/            return 'WS';
        /\d+/            { return "NUMBER"; }
        "=="             EQ_EQ
        [a-zA-Z_]\w*     IDENT
        "#,
    )
    .unwrap();
    let rules = rules_of(raw);
    let patterns: Vec<_> = rules.iter().map(|r| r.pattern.as_str()).collect();
    assert_eq!(patterns, vec![r"\s+", r"\d+", "==", r"[a-zA-Z_]\w*"]);
    assert_eq!(rules[2].handler.call("=="), Some(Emit::Type("EQ_EQ".into())));
}

#[test]
fn slash_pattern_escapes_and_classes() {
    assert_eq!(
        split_pattern(r"/a\/b/ X").unwrap(),
        ("a/b".to_owned(), " X")
    );
    assert_eq!(
        split_pattern(r"/[/]+/ SLASHES").unwrap(),
        ("[/]+".to_owned(), " SLASHES")
    );
    assert_eq!(
        split_pattern(r"/\d\./ X").unwrap(),
        (r"\d\.".to_owned(), " X")
    );
}

#[test]
fn slash_pattern_flags_become_inline_flags() {
    assert_eq!(
        split_pattern("/select/i KW").unwrap(),
        ("(?i)select".to_owned(), " KW")
    );
    assert_eq!(
        split_pattern("/a.b/su T").unwrap(),
        ("(?s)a.b".to_owned(), " T")
    );
    assert_eq!(
        split_pattern("/a/g T").unwrap_err(),
        "flags `g` and `y` have no meaning for a tokenizer rule"
    );
    assert_eq!(split_pattern("/a/z T").unwrap_err(), "unknown regex flag");
}

#[test]
fn quoted_pattern_is_literal() {
    assert_eq!(
        split_pattern(r#""a+b" PLUS"#).unwrap(),
        (r"a\+b".to_owned(), " PLUS")
    );
    assert_eq!(
        split_pattern(r"'\'' QUOTE").unwrap(),
        ("'".to_owned(), " QUOTE")
    );
}

#[test]
fn options_directive() {
    let raw = parse_yacc("%option captureLocations flavor=\"x\" depth=3\n/a/ A\n").unwrap();
    let RawSpec::Record { options, rules } = raw else {
        panic!("expected record");
    };
    assert_eq!(rules.len(), 1);
    assert!(options.capture_locations());
    assert_eq!(options.extra.get("flavor"), Some(&Value::from("x")));
    assert_eq!(options.extra.get("depth"), Some(&Value::from(3)));
}

#[test]
fn later_option_lines_override_earlier() {
    let raw = parse_yacc("%option captureLocations\n%options captureLocations=false\n").unwrap();
    let RawSpec::Record { options, .. } = raw else {
        panic!("expected record");
    };
    assert!(!options.capture_locations());
}

#[test]
fn errors_carry_line_numbers() {
    let cases = [
        ("/a/ A\n/unterminated X", "line 2: unterminated `/pattern/`"),
        ("/a/", "line 1: rule has no handler"),
        ("\n%define x", "line 2: unknown directive `%define`"),
        ("\"abc", "line 1: unterminated quoted pattern"),
    ];
    for (text, message) in cases {
        assert_eq!(parse_yacc(text).unwrap_err().to_string(), message, "input: {text:?}");
    }

    let err = parse_yacc("%option captureLocations=yes").unwrap_err();
    assert!(err.to_string().starts_with("line 1: invalid option `captureLocations=yes`"));
}

#[test]
fn bad_handler_names_line() {
    let err = parse_yacc("/a/ A\n\n/b/ a = b").unwrap_err();
    assert!(matches!(err, FormatError::LineHandler { line: 3, .. }));
}

#[test]
fn parsed_spec_tokenizes_with_locations() {
    let raw = parse_yacc(
        "%option captureLocations\n/[ \\t]+/ WS\n/\\n/ NL\n/\\d+/ NUM\n\"+\" PLUS\n",
    )
    .unwrap();
    let mut lexer = Tokenizer::new(raw).unwrap();
    lexer.init("1 +\n22", None);
    let tokens = lexer.all_tokens().unwrap();
    let summary: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind.as_str(), t.loc.map(|l| (l.start_line, l.start_column))))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("NUM", Some((1, 0))),
            ("WS", Some((1, 1))),
            ("PLUS", Some((1, 2))),
            ("NL", Some((1, 3))),
            ("NUM", Some((2, 0))),
        ]
    );
}

#[test]
fn verbose_flag_with_trailing_comment() {
    let raw = parse_yacc("/[a-z]+ # identifier/x ID\n/ \\s+ # blanks /x WS\n").unwrap();
    let mut lexer = Tokenizer::new(raw).unwrap();
    lexer.init("ab cd", None);
    let kinds: Vec<_> = lexer
        .all_tokens()
        .unwrap()
        .iter()
        .map(|t| t.kind.as_str())
        .collect();
    assert_eq!(kinds, vec!["ID", "WS", "ID"]);
}
