//! The worked examples from RFC 9535, section by section
//!
//! Queries over arrays assert exact order; queries that enumerate object
//! members assert as sorted multisets, since member iteration order is
//! unspecified.

use quyc_jsonpath::JsonPath;
use serde_json::{Value, json};

fn select(expr: &str, doc: &Value) -> Vec<Value> {
    JsonPath::must_parse(expr)
        .select(doc)
        .iter()
        .cloned()
        .collect()
}

/// Render results as a sorted multiset of compact JSON strings.
fn select_multiset(expr: &str, doc: &Value) -> Vec<String> {
    let mut rendered: Vec<String> = select(expr, doc).iter().map(Value::to_string).collect();
    rendered.sort();
    rendered
}

fn multiset(values: &[Value]) -> Vec<String> {
    let mut rendered: Vec<String> = values.iter().map(Value::to_string).collect();
    rendered.sort();
    rendered
}

#[test]
fn section_2_2_3_root_identifier() {
    let doc = json!({"k": "v"});
    assert_eq!(select("$", &doc), vec![doc.clone()]);
}

#[test]
fn section_2_3_1_3_name_selector() {
    let doc = json!({
        "o": {"j j": {"k.k": 3}},
        "'": {"@": 2}
    });
    assert_eq!(select("$.o['j j']", &doc), vec![json!({"k.k": 3})]);
    assert_eq!(select("$.o['j j']['k.k']", &doc), vec![json!(3)]);
    assert_eq!(select("$.o[\"j j\"][\"k.k\"]", &doc), vec![json!(3)]);
    assert_eq!(select("$[\"'\"][\"@\"]", &doc), vec![json!(2)]);
}

#[test]
fn section_2_3_2_3_wildcard_selector() {
    let doc = json!({"o": {"j": 1, "k": 2}, "a": [5, 3]});

    assert_eq!(
        select_multiset("$[*]", &doc),
        multiset(&[json!({"j": 1, "k": 2}), json!([5, 3])])
    );
    assert_eq!(
        select_multiset("$.o[*]", &doc),
        multiset(&[json!(1), json!(2)])
    );
    // Both wildcards produce both values; four results in total.
    assert_eq!(
        select_multiset("$.o[*, *]", &doc),
        multiset(&[json!(1), json!(2), json!(1), json!(2)])
    );
    // Array order is defined.
    assert_eq!(select("$.a[*]", &doc), vec![json!(5), json!(3)]);
}

#[test]
fn section_2_3_3_3_index_selector() {
    let doc = json!(["a", "b"]);
    assert_eq!(select("$[1]", &doc), vec![json!("b")]);
    assert_eq!(select("$[-2]", &doc), vec![json!("a")]);
}

#[test]
fn section_2_3_4_4_slice_selector() {
    let doc = json!(["a", "b", "c", "d", "e", "f", "g"]);
    assert_eq!(select("$[1:3]", &doc), vec![json!("b"), json!("c")]);
    assert_eq!(select("$[5:]", &doc), vec![json!("f"), json!("g")]);
    assert_eq!(select("$[1:5:2]", &doc), vec![json!("b"), json!("d")]);
    assert_eq!(select("$[5:1:-2]", &doc), vec![json!("f"), json!("d")]);
    assert_eq!(
        select("$[::-1]", &doc),
        vec![
            json!("g"),
            json!("f"),
            json!("e"),
            json!("d"),
            json!("c"),
            json!("b"),
            json!("a")
        ]
    );
}

#[test]
fn section_2_3_5_3_filter_selector() {
    let doc = json!({
        "a": [3, 5, 1, 2, 4, 6,
              {"b": "j"}, {"b": "k"}, {"b": {}}, {"b": "kilo"}],
        "o": {"p": 1, "q": 2, "r": 3, "s": 5, "t": {"u": 6}},
        "e": "f"
    });

    // Member value comparison.
    assert_eq!(
        select("$.a[?@.b == 'kilo']", &doc),
        vec![json!({"b": "kilo"})]
    );
    assert_eq!(
        select("$.a[?(@.b == 'kilo')]", &doc),
        vec![json!({"b": "kilo"})]
    );

    // Array value comparison.
    assert_eq!(
        select("$.a[?@>3.5]", &doc),
        vec![json!(5), json!(4), json!(6)]
    );

    // Array value existence.
    assert_eq!(
        select("$.a[?@.b]", &doc),
        vec![json!({"b": "j"}), json!({"b": "k"}), json!({"b": {}}), json!({"b": "kilo"})]
    );

    // Existence of non-singular queries.
    assert_eq!(
        select_multiset("$[?@.*]", &doc),
        multiset(&[doc["a"].clone(), doc["o"].clone()])
    );
    assert_eq!(
        select_multiset("$[?@[?@.b]]", &doc),
        multiset(&[doc["a"].clone()])
    );

    // Non-deterministic ordering; two selectors each contribute.
    assert_eq!(
        select_multiset("$.o[?@<3, ?@<3]", &doc),
        multiset(&[json!(1), json!(2), json!(1), json!(2)])
    );

    // Array value logical OR.
    assert_eq!(
        select("$.a[?@<2 || @.b == \"k\"]", &doc),
        vec![json!(1), json!({"b": "k"})]
    );

    // Array value regular expression match.
    assert_eq!(
        select("$.a[?match(@.b, \"[jk]\")]", &doc),
        vec![json!({"b": "j"}), json!({"b": "k"})]
    );
    assert_eq!(
        select("$.a[?search(@.b, \"[jk]\")]", &doc),
        vec![json!({"b": "j"}), json!({"b": "k"}), json!({"b": "kilo"})]
    );

    // Object value logical AND.
    assert_eq!(
        select_multiset("$.o[?@>1 && @<4]", &doc),
        multiset(&[json!(2), json!(3)])
    );

    // Object value logical OR.
    assert_eq!(
        select_multiset("$.o[?@.u || @.x]", &doc),
        multiset(&[json!({"u": 6})])
    );

    // Comparison of queries with no values: both sides are Nothing for
    // the primitive elements, so they match.
    assert_eq!(
        select("$.a[?@.b == $.x]", &doc),
        vec![json!(3), json!(5), json!(1), json!(2), json!(4), json!(6)]
    );

    // Comparisons of primitive and structured values.
    assert_eq!(select("$.a[?@ == @]", &doc).len(), 10);
}

#[test]
fn section_2_5_1_2_child_segment() {
    let doc = json!(["a", "b", "c", "d", "e", "f", "g"]);
    assert_eq!(select("$[0, 3]", &doc), vec![json!("a"), json!("d")]);
    assert_eq!(
        select("$[0:2, 5]", &doc),
        vec![json!("a"), json!("b"), json!("f")]
    );
    assert_eq!(select("$[0, 0]", &doc), vec![json!("a"), json!("a")]);
}

#[test]
fn section_2_5_2_3_descendant_segment() {
    let doc = json!({
        "o": {"j": 1, "k": 2},
        "a": [5, 3, [{"j": 4}, {"k": 6}]]
    });

    assert_eq!(
        select_multiset("$..j", &doc),
        multiset(&[json!(1), json!(4)])
    );
    assert_eq!(
        select_multiset("$..[0]", &doc),
        multiset(&[json!(5), json!({"j": 4})])
    );
    // Every member value and array element, at every depth.
    assert_eq!(select("$..*", &doc).len(), 11);
}

#[test]
fn section_2_6_1_null_semantics() {
    let doc = json!({"a": null, "b": [null], "c": [{}], "null": 1});

    assert_eq!(select("$.a", &doc), vec![json!(null)]);
    // null used as an array or object selects nothing.
    assert!(select("$.a[0]", &doc).is_empty());
    assert!(select("$.a.d", &doc).is_empty());
    assert_eq!(select("$.b[0]", &doc), vec![json!(null)]);
    assert_eq!(select("$.b[*]", &doc), vec![json!(null)]);
    // null is a comparable value, distinct from absence.
    assert_eq!(select("$[?@ == null]", &doc), vec![json!(null)]);
    // "null" as a member name is just a name.
    assert_eq!(select("$.null", &doc), vec![json!(1)]);
}

#[test]
fn section_2_4_function_well_typedness() {
    // Well-typed examples from §2.4.3.
    for expr in [
        "$[?length(@) < 3]",
        "$[?length(@.authors) >= 5]",
        "$[?count(@.*.author) >= 5]",
        "$[?match(@.timezone, 'Europe/.*')]",
        "$[?value(@..color) == \"red\"]",
    ] {
        assert!(quyc_jsonpath::is_valid(expr), "{expr:?}");
    }

    // Not well-typed examples from §2.4.3.
    for expr in [
        "$[?length(@.authors.*) >= 5]", // non-singular query as ValueType
        "$[?count(@.*.author)]",        // ValueType result used as a test
        "$[?match(@.timezone, 'Europe/.*') == true]", // LogicalType compared
    ] {
        assert!(!quyc_jsonpath::is_valid(expr), "{expr:?}");
    }
}
