use crate::value::{Value, ValueMap, ValueTag, canonical_rank, fold_ci, sort_cmp};
use std::cmp::Ordering;

// ---- helpers -----------------------------------------------------------

fn json(text: &str) -> Value {
    Value::from_json_str(text).expect("test JSON should parse")
}

// ---- construction ------------------------------------------------------

#[test]
fn object_keys_keep_source_order() {
    let value = json(r#"{"z":1,"a":2,"m":3}"#);
    let keys: Vec<&str> = value.as_object().expect("object").keys().collect();

    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn wide_object_converts_every_member_in_order() {
    let members: Vec<String> = (0..2_000).map(|i| format!("\"k{i}\":{i}")).collect();
    let value = json(&format!("{{{}}}", members.join(",")));
    let object = value.as_object().expect("object");

    assert_eq!(object.len(), 2_000);
    assert_eq!(object.keys().next(), Some("k0"));
    assert_eq!(object.keys().last(), Some("k1999"));
    assert_eq!(object.get("k1234"), Some(&Value::int(1234)));
}

#[test]
fn duplicate_json_members_keep_first_position_and_last_value() {
    let value = json(r#"{"a":1,"b":2,"a":3}"#);
    let object = value.as_object().expect("object");

    assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(object.get("a"), Some(&Value::int(3)));
}

#[test]
fn duplicate_insert_replaces_in_place() {
    let mut map = ValueMap::new();
    map.insert("a", Value::int(1));
    map.insert("b", Value::int(2));
    let previous = map.insert("a", Value::int(3));

    assert_eq!(previous, Some(Value::int(1)));
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(map.get("a"), Some(&Value::int(3)));
}

#[test]
fn lookups_return_none_on_kind_mismatch() {
    let value = json(r#"{"items":[1,2]}"#);

    assert!(value.get("missing").is_none());
    assert!(value.index(0).is_none());
    assert!(value.get("items").and_then(|v| v.get("0")).is_none());
    assert_eq!(value.get("items").and_then(|v| v.index(1)), Some(&Value::int(2)));
}

// ---- rendering ---------------------------------------------------------

#[test]
fn float_text_switches_to_exponent_form_at_script_thresholds() {
    assert_eq!(json("1e20").display_text(), "100000000000000000000");
    assert_eq!(json("1e21").display_text(), "1e+21");
    assert_eq!(json("1.5e300").display_text(), "1.5e+300");
    assert_eq!(json("1e-7").display_text(), "1e-7");
    assert_eq!(json("-2.5e-8").display_text(), "-2.5e-8");
    assert_eq!(json("1.25e-6").display_text(), "0.00000125");
}

#[test]
fn display_text_matches_script_string_conversion() {
    assert_eq!(Value::Null.display_text(), "null");
    assert_eq!(Value::Bool(true).display_text(), "true");
    assert_eq!(json("42").display_text(), "42");
    assert_eq!(json("2.5").display_text(), "2.5");
    assert_eq!(json("1.0").display_text(), "1");
    assert_eq!(json("-0.0").display_text(), "0");
    assert_eq!(json("123.456").display_text(), "123.456");
    assert_eq!(json("0.000001").display_text(), "0.000001");
    assert_eq!(Value::text("abc").display_text(), "abc");
    assert_eq!(json("[1,null,\"x\"]").display_text(), "1,,x");
    assert_eq!(json(r#"{"a":1}"#).display_text(), "[object Object]");
}

#[test]
fn to_json_string_is_compact_and_ordered() {
    let value = json(r#"{ "b": [1, 2], "a": { "c": null } }"#);

    assert_eq!(value.to_json_string(), r#"{"b":[1,2],"a":{"c":null}}"#);
}

// ---- ordering ----------------------------------------------------------

#[test]
fn tags_follow_fixed_rank_order() {
    assert_eq!(canonical_rank(&Value::Null), 0);
    assert_eq!(canonical_rank(&json("{}")), 5);
    assert_eq!(Value::Bool(false).tag(), ValueTag::Bool);
    assert_eq!(ValueTag::Array.label(), "Array");
}

#[test]
fn sort_cmp_puts_absent_first_then_rank() {
    let null = Value::Null;
    let number = Value::int(1);
    let text = Value::text("a");

    assert_eq!(sort_cmp(None, Some(&null)), Ordering::Less);
    assert_eq!(sort_cmp(Some(&null), Some(&number)), Ordering::Less);
    assert_eq!(sort_cmp(Some(&text), Some(&number)), Ordering::Greater);
    assert_eq!(sort_cmp(None, None), Ordering::Equal);
}

#[test]
fn sort_cmp_numbers_compare_numerically() {
    let small = json("9");
    let large = json("10");
    let float = json("9.5");

    assert_eq!(sort_cmp(Some(&small), Some(&large)), Ordering::Less);
    assert_eq!(sort_cmp(Some(&float), Some(&large)), Ordering::Less);
    assert_eq!(sort_cmp(Some(&float), Some(&small)), Ordering::Greater);
}

#[test]
fn sort_cmp_text_is_case_insensitive_with_stable_tiebreak() {
    let upper = Value::text("Apple");
    let lower = Value::text("apple");
    let other = Value::text("banana");

    assert_eq!(sort_cmp(Some(&lower), Some(&other)), Ordering::Less);
    assert_eq!(sort_cmp(Some(&upper), Some(&other)), Ordering::Less);
    assert_eq!(sort_cmp(Some(&upper), Some(&lower)), Ordering::Less);
}

#[test]
fn fold_ci_preserves_character_count() {
    let folded = fold_ci("ÀBÇ");

    assert_eq!(folded, "àbç");
    assert_eq!(folded.chars().count(), 3);
    assert!(matches!(fold_ci("plain"), std::borrow::Cow::Borrowed(_)));
}
