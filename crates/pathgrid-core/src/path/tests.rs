use crate::{
    path::{Path, PathParseError, Segment, resolve, resolve_str, split_path},
    value::Value,
};
use proptest::prelude::*;

// ---- helpers -----------------------------------------------------------

fn json(text: &str) -> Value {
    Value::from_json_str(text).expect("test JSON should parse")
}

fn path(text: &str) -> Path {
    Path::parse(text).expect("test path should parse")
}

// ---- splitting ---------------------------------------------------------

#[test]
fn split_path_separates_keys_and_brackets() {
    assert_eq!(split_path("a.b[0].c"), vec!["a", "b", "[0]", "c"]);
    assert_eq!(split_path(r#"arr[k="v"].f"#), vec!["arr", r#"[k="v"]"#, "f"]);
    assert_eq!(split_path("[0].name"), vec!["[0]", "name"]);
}

#[test]
fn split_path_keeps_dots_and_brackets_inside_filter_literals() {
    assert_eq!(
        split_path(r#"items[name="a.b]c"].v"#),
        vec!["items", r#"[name="a.b]c"]"#, "v"]
    );
}

#[test]
fn split_path_skips_empty_tokens() {
    assert_eq!(split_path("a..b."), vec!["a", "b"]);
    assert!(split_path("").is_empty());
}

// ---- parsing -----------------------------------------------------------

#[test]
fn parse_builds_tagged_segments() {
    let parsed = path(r#"orders[2].lines[sku="X-1"].qty"#);

    assert_eq!(
        parsed.segments(),
        &[
            Segment::key("orders"),
            Segment::Index(2),
            Segment::key("lines"),
            Segment::filter("sku", "X-1"),
            Segment::key("qty"),
        ]
    );
}

#[test]
fn numeric_keys_and_indices_are_distinguished_by_syntax() {
    assert_eq!(path("a.0").segments(), &[Segment::key("a"), Segment::key("0")]);
    assert_eq!(path("a[0]").segments(), &[Segment::key("a"), Segment::Index(0)]);
}

#[test]
fn parse_unescapes_filter_literals() {
    let parsed = path(r#"items[title="say \"hi\""]"#);

    assert_eq!(parsed.last(), &Segment::filter("title", r#"say "hi""#));
}

#[test]
fn parse_rejects_malformed_paths() {
    assert_eq!(Path::parse(""), Err(PathParseError::Empty));
    assert_eq!(Path::parse("..."), Err(PathParseError::Empty));
    assert!(matches!(
        Path::parse("a[0"),
        Err(PathParseError::Unterminated { .. })
    ));
    assert!(matches!(
        Path::parse("a[-1]"),
        Err(PathParseError::InvalidBracket { .. })
    ));
    assert!(matches!(
        Path::parse("a[k=v]"),
        Err(PathParseError::InvalidBracket { .. })
    ));
    assert!(matches!(
        Path::parse(r#"a[="v"]"#),
        Err(PathParseError::EmptyFilterField { .. })
    ));
}

#[test]
fn display_round_trips_string_form() {
    for text in [
        "a",
        "a.b.c",
        "a[0].b",
        "[0].name",
        r#"items[id="b"].v"#,
        r#"items[t="q\"x"]"#,
    ] {
        assert_eq!(path(text).to_string(), text);
    }
}

#[test]
fn structural_helpers() {
    let p = path("a.b[1].c");

    assert!(!p.is_top_level());
    assert!(path("a").is_top_level());
    assert!(!path("[0]").is_top_level());
    assert_eq!(p.root_key(), Some("a"));
    assert_eq!(p.parent(), Some(path("a.b[1]")));
    assert_eq!(path("a").parent(), None);
    assert_eq!(
        p.ancestors(),
        vec![path("a"), path("a.b"), path("a.b[1]")]
    );
    assert!(path(r#"a[k="1"]"#).has_filter());
}

// ---- resolution --------------------------------------------------------

#[test]
fn resolve_walks_keys_and_indices() {
    let record = json(r#"{"a":{"b":[{"c":1},{"c":2}]}}"#);

    assert_eq!(resolve_str(&record, "a.b[1].c"), Some(&json("2")));
    assert_eq!(resolve_str(&record, "a.b[2].c"), None);
    assert_eq!(resolve_str(&record, "a.x.c"), None);
}

#[test]
fn resolve_filter_segment_selects_first_match() {
    let record = json(r#"{"items":[{"id":"a","v":1},{"id":"b","v":2}]}"#);

    assert_eq!(resolve_str(&record, r#"items[id="b"].v"#), Some(&json("2")));
    assert_eq!(resolve_str(&record, r#"items[id="z"].v"#), None);
}

#[test]
fn resolve_filter_compares_rendered_text() {
    let record = json(r#"{"items":[{"id":7,"ok":true},{"id":8,"ok":false}]}"#);

    assert_eq!(
        resolve_str(&record, r#"items[id="8"].ok"#),
        Some(&Value::Bool(false))
    );
    assert_eq!(
        resolve_str(&record, r#"items[ok="true"].id"#),
        Some(&json("7"))
    );
}

#[test]
fn resolve_distinguishes_null_from_absent() {
    let record = json(r#"{"a":null}"#);

    assert_eq!(resolve_str(&record, "a"), Some(&Value::Null));
    assert_eq!(resolve_str(&record, "b"), None);
    assert_eq!(resolve_str(&record, "a.b"), None);
}

#[test]
fn resolve_type_mismatches_are_absent() {
    let record = json(r#"{"obj":{"0":"zero"},"arr":[1],"s":"text"}"#);

    assert_eq!(resolve_str(&record, "obj[0]"), None);
    assert_eq!(resolve_str(&record, "obj.0"), Some(&Value::text("zero")));
    assert_eq!(resolve_str(&record, "arr.0"), None);
    assert_eq!(resolve_str(&record, "s[0]"), None);
    assert_eq!(resolve_str(&record, r#"obj[k="v"]"#), None);
    assert_eq!(resolve_str(&record, "arr[0"), None);
}

#[test]
fn resolve_root_level_array() {
    let record = json(r#"[{"name":"first"}]"#);

    assert_eq!(resolve_str(&record, "[0].name"), Some(&Value::text("first")));
}

#[test]
fn ancestors_resolve_to_containers() {
    let record = json(r#"{"a":{"b":[{"c":1}]}}"#);
    let p = path("a.b[0].c");

    for ancestor in p.ancestors() {
        let value = resolve(&record, &ancestor).expect("ancestor should resolve");
        assert!(value.is_container(), "{ancestor} should be a container");
    }
}

// ---- properties --------------------------------------------------------

fn arb_key() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}"
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        arb_key().prop_map(Segment::Key),
        (0usize..50).prop_map(Segment::Index),
        (arb_key(), r#"[a-zA-Z0-9 .\]\["\\=-]{0,8}"#)
            .prop_map(|(field, value)| Segment::Filter { field, value }),
    ]
}

fn arb_path() -> impl Strategy<Value = Path> {
    (arb_key(), prop::collection::vec(arb_segment(), 0..5)).prop_map(|(head, tail)| {
        let mut segments = vec![Segment::Key(head)];
        segments.extend(tail);
        Path::from_segments(segments).expect("non-empty")
    })
}

proptest! {
    #[test]
    fn display_then_parse_is_identity(p in arb_path()) {
        let text = p.to_string();
        let reparsed = Path::parse(&text);

        prop_assert_eq!(reparsed, Ok(p));
    }

    #[test]
    fn resolve_never_panics_on_arbitrary_text(text in ".{0,24}") {
        let record = json(r#"{"a":[{"b":1}],"c":{"d":null}}"#);
        let _ = resolve_str(&record, &text);
    }
}
