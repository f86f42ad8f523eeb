//! Integration tests for template parsing.

use msgfmt_syntax::{
    Case, FunctionParam, ParseError, ParseOptions, SelectorKind, SelectorNode, Token, argument_names,
    parse,
};

fn parse_default(source: &str) -> Vec<Token> {
    parse(source, &ParseOptions::default()).unwrap()
}

fn content(text: &str) -> Token {
    Token::Content(text.to_string())
}

fn argument(name: &str) -> Token {
    Token::Argument {
        arg: name.to_string(),
    }
}

fn case(key: &str, body: Vec<Token>) -> Case {
    Case {
        key: key.to_string(),
        body,
    }
}

// =============================================================================
// Text and escapes
// =============================================================================

#[test]
fn test_empty_template() {
    assert_eq!(parse_default(""), vec![]);
}

#[test]
fn test_plain_text() {
    assert_eq!(parse_default("Hello, world!"), vec![content("Hello, world!")]);
}

#[test]
fn test_doubled_apostrophe() {
    assert_eq!(parse_default("It''s here"), vec![content("It's here")]);
}

#[test]
fn test_lone_apostrophe_is_literal() {
    assert_eq!(parse_default("It's here"), vec![content("It's here")]);
}

#[test]
fn test_quoted_braces() {
    assert_eq!(
        parse_default("This is '{'not an argument'}'"),
        vec![content("This is {not an argument}")]
    );
}

#[test]
fn test_quoted_literal_with_escaped_apostrophe() {
    assert_eq!(parse_default("'{a''b}'"), vec![content("{a'b}")]);
}

#[test]
fn test_hash_outside_plural_is_text() {
    assert_eq!(parse_default("#1 {x}"), vec![content("#1 "), argument("x")]);
}

#[test]
fn test_quoted_hash_outside_plural_keeps_apostrophes() {
    assert_eq!(parse_default("'#'"), vec![content("'#'")]);
}

// =============================================================================
// Placeholders
// =============================================================================

#[test]
fn test_argument_with_whitespace() {
    assert_eq!(
        parse_default("Hi { name }!"),
        vec![content("Hi "), argument("name"), content("!")]
    );
}

#[test]
fn test_function_without_style() {
    assert_eq!(
        parse_default("{n, number}"),
        vec![Token::Function {
            arg: "n".to_string(),
            key: "number".to_string(),
            param: None,
        }]
    );
}

#[test]
fn test_function_style_parsed_as_tokens() {
    assert_eq!(
        parse_default("{n, number, integer }"),
        vec![Token::Function {
            arg: "n".to_string(),
            key: "number".to_string(),
            param: Some(FunctionParam::Tokens(vec![content("integer")])),
        }]
    );
}

#[test]
fn test_function_style_raw_in_strict_mode() {
    let tokens = parse("{d, date, {y} 'x' }", &ParseOptions::strict()).unwrap();
    assert_eq!(
        tokens,
        vec![Token::Function {
            arg: "d".to_string(),
            key: "date".to_string(),
            param: Some(FunctionParam::Raw("{y} 'x'".to_string())),
        }]
    );
}

#[test]
fn test_positional_argument() {
    assert_eq!(parse_default("{0} and {1}"), vec![
        argument("0"),
        content(" and "),
        argument("1"),
    ]);
}

// =============================================================================
// Selectors
// =============================================================================

#[test]
fn test_plural_with_offset_and_octothorpe() {
    let tokens = parse_default("{n, plural, offset:1 =0{none} one{# item} other{# items}}");
    assert_eq!(
        tokens,
        vec![Token::Selector(SelectorNode {
            kind: SelectorKind::Plural,
            arg: "n".to_string(),
            offset: Some(1),
            cases: vec![
                case("=0", vec![content("none")]),
                case("one", vec![Token::Octothorpe, content(" item")]),
                case("other", vec![Token::Octothorpe, content(" items")]),
            ],
        })]
    );
}

#[test]
fn test_selectordinal() {
    let tokens = parse_default("{n, selectordinal, one{#st} other{#th}}");
    let Token::Selector(node) = &tokens[0] else {
        panic!("expected selector");
    };
    assert_eq!(node.kind, SelectorKind::SelectOrdinal);
    assert_eq!(node.cases.len(), 2);
    assert_eq!(node.offset, None);
}

#[test]
fn test_select_cases() {
    let tokens = parse_default("{g, select, male{He} female{She} other{They}}");
    let Token::Selector(node) = &tokens[0] else {
        panic!("expected selector");
    };
    assert_eq!(node.kind, SelectorKind::Select);
    assert_eq!(node.case("female").unwrap().body, vec![content("She")]);
    assert_eq!(node.catchall().unwrap().body, vec![content("They")]);
}

#[test]
fn test_quoted_hash_inside_plural() {
    let tokens = parse_default("{n, plural, other{'#'#}}");
    let Token::Selector(node) = &tokens[0] else {
        panic!("expected selector");
    };
    assert_eq!(node.cases[0].body, vec![content("#"), Token::Octothorpe]);
}

#[test]
fn test_hash_in_select_nested_in_plural_lenient() {
    let tokens = parse_default("{n, plural, other{{g, select, other{#}}}}");
    let Token::Selector(plural) = &tokens[0] else {
        panic!("expected selector");
    };
    let Token::Selector(select) = &plural.cases[0].body[0] else {
        panic!("expected nested selector");
    };
    assert_eq!(select.cases[0].body, vec![Token::Octothorpe]);
}

#[test]
fn test_hash_in_select_nested_in_plural_strict() {
    let tokens = parse(
        "{n, plural, other{{g, select, other{#}}}}",
        &ParseOptions::strict(),
    )
    .unwrap();
    let Token::Selector(plural) = &tokens[0] else {
        panic!("expected selector");
    };
    let Token::Selector(select) = &plural.cases[0].body[0] else {
        panic!("expected nested selector");
    };
    assert_eq!(select.cases[0].body, vec![content("#")]);
}

#[test]
fn test_offset_keyword_can_be_a_case_key() {
    let tokens = parse_default("{g, select, offset{x} other{y}}");
    let Token::Selector(node) = &tokens[0] else {
        panic!("expected selector");
    };
    assert_eq!(node.cases[0].key, "offset");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unterminated_quote() {
    let err = parse("abc '{ def", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedQuote { .. }));
    assert_eq!(err.span().offset, 4);
}

#[test]
fn test_unclosed_argument() {
    let err = parse("Hello {name", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEnd { .. }));
}

#[test]
fn test_unmatched_close() {
    let err = parse("a } b", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
    assert_eq!(err.span().column, 3);
}

#[test]
fn test_empty_argument_name() {
    let err = parse("{}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn test_invalid_identifier_character() {
    let err = parse("{na*me}", &ParseOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidIdentifier {
            span: err.span(),
            found: '*',
        }
    );
}

#[test]
fn test_selector_keyword_requires_cases() {
    let err = parse("{n, plural}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn test_offset_after_case() {
    let err = parse("{n, plural, one{a} offset:1 other{b}}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::OffsetAfterCase { .. }));
}

#[test]
fn test_negative_offset() {
    let err = parse("{n, plural, offset:-1 other{b}}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::NegativeOffset { .. }));
}

#[test]
fn test_offset_on_select() {
    let err = parse("{g, select, offset:1 other{b}}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::OffsetOnSelect { .. }));
}

#[test]
fn test_exact_key_on_select() {
    let err = parse("{g, select, =1{a} other{b}}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::ExactKeyOnSelect { ref key, .. } if key == "=1"));
}

#[test]
fn test_case_without_body() {
    let err = parse("{n, plural, one other{b}}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
}

#[test]
fn test_unclosed_case_body() {
    let err = parse("{n, plural, other{b}", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedEnd { .. }));
}

#[test]
fn test_error_line_and_column() {
    let err = parse("first line\nsecond {x", &ParseOptions::default()).unwrap_err();
    let span = err.span();
    assert_eq!(span.line, 2);
    assert_eq!(span.column, 10);
    assert!(err.to_string().contains("2:10"));
}

#[test]
fn test_hash_brace_quote_outside_plural_is_rejected() {
    let err = parse("'#{'", &ParseOptions::default()).unwrap_err();
    assert!(err.to_string().contains("unsupported escape pattern"));
}

#[test]
fn argument_names_cover_nested_placeholders() {
    let tokens = parse_default(
        "{b} {a, number, {c}} {n, plural, one{{d}} other{{e, select, x{{b}} other{}}}}",
    );
    assert_eq!(argument_names(&tokens), vec!["a", "b", "c", "d", "e", "n"]);
}
