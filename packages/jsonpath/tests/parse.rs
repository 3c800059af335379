//! Parse errors, static-rule enforcement, and canonical round-trips

use quyc_jsonpath::{ErrorKind, JsonPath, is_valid};
use serde_json::{Value, json};

fn parse_err(expr: &str) -> quyc_jsonpath::JsonPathError {
    match JsonPath::parse(expr) {
        Ok(path) => panic!("expected parse failure for {expr:?}, got {path}"),
        Err(err) => err,
    }
}

#[test]
fn rejects_structurally_invalid_queries() {
    let cases = [
        "",             // no root identifier
        "store",        // missing $ or @
        "$[]",          // empty bracketed segment
        "$..",          // dangling descendant segment
        "$.",           // dangling dot
        "$. foo",       // whitespace after .
        "$.. foo",      // whitespace after ..
        "$foo",         // member access without . or []
        "$.store.",     // trailing dot
        "$['a'",        // unterminated bracket
        "$[1,]",        // trailing comma
        "$[1 2]",       // missing separator
        "$.*.",         // dangling dot after wildcard
        "$x[0]",        // stray identifier after root
    ];
    for expr in cases {
        assert!(!is_valid(expr), "expected rejection of {expr:?}");
        assert_eq!(parse_err(expr).kind(), ErrorKind::Parse, "{expr:?}");
    }
}

#[test]
fn rejects_lexically_invalid_queries() {
    let cases = [
        "$[?@.a = 1]",   // lone =
        "$[?@.a & @.b]", // lone &
        "$[?@.a | @.b]", // lone |
        "$['abc",        // unterminated string
        "$['bad\\q']",   // invalid escape
        "$[01]",         // leading zero
        "$[#]",          // stray character
    ];
    for expr in cases {
        let err = parse_err(expr);
        assert_eq!(err.kind(), ErrorKind::Lex, "{expr:?} -> {err}");
    }
}

#[test]
fn rejects_whitespace_at_input_edges() {
    for expr in [" $.a", "$.a ", "\t$.a", "$.a\n"] {
        assert_eq!(parse_err(expr).kind(), ErrorKind::Parse, "{expr:?}");
    }
    // Whitespace inside brackets and filters is fine.
    assert!(is_valid("$[ 1 , 2 ]"));
    assert!(is_valid("$[? @.a == 1 ]"));
    assert!(is_valid("$[ 'a' ]"));
}

#[test]
fn rejects_invalid_indexes() {
    for expr in [
        "$[-0]",
        "$[1:-0]",
        "$[::-0]",
        "$[9007199254740992]",  // 2^53
        "$[-9007199254740992]", // -(2^53)
        "$[99999999999999999999]",
    ] {
        let err = parse_err(expr);
        assert_eq!(err.kind(), ErrorKind::Parse, "{expr:?} -> {err}");
    }
    // The extremes of the interoperable range parse.
    assert!(is_valid("$[9007199254740991]"));
    assert!(is_valid("$[-9007199254740991]"));
    // -0 is fine as a literal in a comparison, where it means 0.
    assert!(is_valid("$[?@.a == -0]"));
}

#[test]
fn enforces_filter_static_rules() {
    // Non-singular query as comparison operand.
    for expr in [
        "$[?@.a == @.b.*]",
        "$[?@..b == 1]",
        "$[?@[1,2] < 3]",
        "$[?@.a[1:2] != 4]",
    ] {
        let err = parse_err(expr);
        assert!(
            err.message().contains("non-singular"),
            "{expr:?} -> {err}"
        );
    }

    // Value-typed call standing alone as a test.
    let err = parse_err("$[?length(@)]");
    assert!(err.message().contains("comparison"), "{err}");

    // Logical-typed call as a comparison operand, either side.
    for expr in [
        "$[?@.a == match(@.b, \".*\")]",
        "$[?match(@.b, \".*\") == true]",
    ] {
        let err = parse_err(expr);
        assert!(err.message().contains("compared"), "{expr:?} -> {err}");
    }

    // Negation applies only to logical things.
    let err = parse_err("$[?!length(@)]");
    assert!(err.message().contains("negated"), "{err}");
    assert!(is_valid("$[?!match(@.a, \"x\")]"));
    assert!(is_valid("$[?!@.a]"));
    assert!(is_valid("$[?!(@.a == 1)]"));

    // A bare literal is not a test expression.
    assert!(!is_valid("$[?true]"));
    assert!(!is_valid("$[?1]"));
}

#[test]
fn enforces_function_rules() {
    // Unknown function.
    let err = parse_err("$[?bogus(@.a)]");
    assert!(err.message().contains("unknown function"), "{err}");

    // Wrong argument counts.
    assert!(!is_valid("$[?length(@.a, 2) == 1]"));
    assert!(!is_valid("$[?length() == 1]"));
    assert!(!is_valid("$[?match(@.a) ]"));

    // Incompatible argument types: count() needs a query, not a literal.
    assert!(!is_valid("$[?count(1) == 1]"));
    // match() needs values, not a non-singular node stream.
    assert!(!is_valid("$[?match(@.a.*, \"x\")]"));

    // Nested call result types validate recursively.
    assert!(is_valid("$[?length(value(@.names)) == 3]"));
    assert!(!is_valid("$[?count(match(@.a, \"x\")) == 1]"));

    // No whitespace between function name and parenthesis.
    assert!(!is_valid("$[?length (@.a) == 1]"));
}

#[test]
fn error_positions_are_byte_offsets() {
    let err = parse_err("$[?@.a == @.b.*]");
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.position().is_some());

    let err = parse_err("$. foo");
    assert_eq!(err.position(), Some(2), "{err}");

    let err = parse_err("store");
    assert_eq!(err.position(), Some(0), "{err}");

    // Errors at end of input carry no position and render distinctly.
    let err = parse_err("$[");
    assert_eq!(err.position(), None, "{err}");
    assert!(err.to_string().contains("at end of input"), "{err}");

    let err = parse_err("$['a'");
    assert_eq!(err.position(), None, "{err}");
}

#[test]
fn lex_error_positions_point_at_offending_byte() {
    let err = parse_err("$[?@.a = 1]");
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.position(), Some(7), "{err}");
}

#[test]
fn relative_queries_parse_at_top_level() {
    assert!(is_valid("@.a.b"));
    assert!(is_valid("@"));
    let doc = json!({"a": {"b": 7}});
    let path = JsonPath::must_parse("@.a.b");
    assert_eq!(path.select(&doc).into_vec(), vec![&json!(7)]);
}

#[test]
fn canonical_forms_reparse_equivalently() {
    let doc = json!({
        "store": {
            "book": [
                {"title": "A", "price": 1, "tags": ["x"]},
                {"title": "B", "price": 10, "tags": []}
            ]
        },
        "max": 5
    });

    let exprs = [
        "$",
        "$.store.book[*].title",
        "$..price",
        "$.store.book[0,-1]",
        "$.store.book[::2]",
        "$.store.book[1:]",
        "$[?@.a == 1]",
        "$.store.book[?@.price < $.max].title",
        "$.store.book[?@.tags && @.price >= 1]",
        "$.store.book[?match(@.title, \"A|B\") || !(@.price > 5)]",
        "$.store.book[?count(@.tags[*]) == 1].title",
        "$.store.book[?!@.missing]",
        "$..book[?search(@.title, \"a.c\")]",
    ];

    for expr in exprs {
        let first = JsonPath::must_parse(expr);
        let canonical = first.to_string();
        let second = JsonPath::parse(&canonical)
            .unwrap_or_else(|err| panic!("canonical form {canonical:?} failed to reparse: {err}"));
        // Canonicalization is a fixed point after one round.
        assert_eq!(second.to_string(), canonical, "source {expr:?}");
        // And evaluation behavior is preserved.
        let a: Vec<&Value> = first.select(&doc).into_vec();
        let b: Vec<&Value> = second.select(&doc).into_vec();
        assert_eq!(a, b, "source {expr:?} vs canonical {canonical:?}");
    }
}

#[test]
fn canonical_form_uses_bracket_notation() {
    let path = JsonPath::must_parse("$.store.book[0].title");
    assert_eq!(path.to_string(), "$[\"store\"][\"book\"][0][\"title\"]");

    let path = JsonPath::must_parse("$..book[1:2]");
    assert_eq!(path.to_string(), "$..[\"book\"][1:2]");

    let path = JsonPath::must_parse("$.a[?@.b == 'x']");
    assert_eq!(path.to_string(), "$[\"a\"][?@[\"b\"] == \"x\"]");
}

#[test]
fn singularity_is_statically_known() {
    let singular = ["$", "$.a.b", "$['a'][0]", "$.a[-1]"];
    for expr in singular {
        assert!(JsonPath::must_parse(expr).is_singular(), "{expr:?}");
    }
    let plural = ["$.a[*]", "$..a", "$.a[0,1]", "$.a[1:]", "$[?@.x]"];
    for expr in plural {
        assert!(!JsonPath::must_parse(expr).is_singular(), "{expr:?}");
    }
}

#[test]
fn must_parse_panics_with_error_message() {
    let result = std::panic::catch_unwind(|| JsonPath::must_parse("$["));
    assert!(result.is_err());
}

#[test]
fn serde_round_trip_uses_canonical_string() {
    let path = JsonPath::must_parse("$.a[0]");
    let text = serde_json::to_string(&path).expect("serialize");
    assert_eq!(text, "\"$[\\\"a\\\"][0]\"");

    let back: JsonPath = serde_json::from_str(&text).expect("deserialize");
    assert_eq!(back.to_string(), path.to_string());

    assert!(serde_json::from_str::<JsonPath>("\"not a path\"").is_err());
}
