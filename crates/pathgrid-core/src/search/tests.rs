use crate::{
    path::{Path, resolve},
    search::{Direction, MatchedPart, SearchEngine, SearchOptions, search, search_with},
    value::Value,
};
use proptest::prelude::*;

fn json(text: &str) -> Value {
    Value::from_json_str(text).expect("json")
}

#[test]
fn blank_query_finds_nothing() {
    let records = vec![json(r#"{"a":" "}"#)];

    assert!(search(&records, "").is_empty());
    assert!(search(&records, "   ").is_empty());
}

#[test]
fn key_match_wins_over_value_at_same_path() {
    let matches = search(&[json(r#"{"value":"value"}"#)], "value");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path, Path::key("value"));
    assert_eq!(matches[0].matched_part, MatchedPart::Key);
    assert_eq!(matches[0].matched_key_name.as_deref(), Some("value"));
}

#[test]
fn offsets_are_non_overlapping_character_positions() {
    let matches = search(&[json(r#"{"s":"ababab","t":"ÉcoleÉcole"}"#)], "ab");
    assert_eq!(matches[0].offsets, vec![0, 2, 4]);

    let matches = search(&[json(r#"{"t":"xÉcoleécole"}"#)], "école");
    assert_eq!(matches[0].offsets, vec![1, 6]);

    let matches = search(&[json(r#"{"s":"aaaa"}"#)], "aa");
    assert_eq!(matches[0].offsets, vec![0, 2]);
}

#[test]
fn search_is_case_insensitive_on_keys_and_values() {
    let matches = search(&[json(r#"{"UserName":"ALICE"}"#)], "alice");

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].matched_part, MatchedPart::Value);
    assert_eq!(matches[0].value, Value::text("ALICE"));

    let matches = search(&[json(r#"{"UserName":"x"}"#)], "NAME");
    assert_eq!(matches[0].offsets, vec![4]);
}

#[test]
fn key_match_still_descends_into_its_value() {
    let records = vec![json(r#"{"tags":[{"tag":"tagged"}]}"#)];

    let found: Vec<(String, MatchedPart)> = search(&records, "tag")
        .into_iter()
        .map(|m| (m.path.to_string(), m.matched_part))
        .collect();

    assert_eq!(
        found,
        vec![
            ("tags".to_string(), MatchedPart::Key),
            ("tags[0].tag".to_string(), MatchedPart::Key),
        ]
    );
}

#[test]
fn numbers_bools_and_null_match_their_text() {
    let records = vec![json(r#"{"n":120,"b":true,"z":null}"#), json(r#"[1.5]"#)];

    let paths: Vec<String> = search(&records, "1")
        .iter()
        .map(|m| format!("{}:{}", m.record_index, m.path))
        .collect();
    assert_eq!(paths, vec!["0:n", "1:[0]"]);

    assert_eq!(search(&records, "tru")[0].path, Path::key("b"));
    let nulls = search(&records, "null");
    assert_eq!(nulls.len(), 1);
    assert_eq!(nulls[0].path, Path::key("z"));
    assert_eq!(nulls[0].matched_part, MatchedPart::Value);
    assert_eq!(nulls[0].value, Value::Null);
    assert_eq!(nulls[0].offsets, vec![0]);
}

#[test]
fn max_matches_truncates_in_order() {
    let records = vec![json(r#"{"a":"x","b":"x"}"#), json(r#"{"c":"x"}"#)];
    let options = SearchOptions { max_matches: 2 };

    let matches = search_with(&records, "x", &options);

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[1].path, Path::key("b"));
}

#[test]
fn match_ancestors_are_expandable_containers() {
    let record = json(r#"{"a":{"b":[{"c":"needle"}]}}"#);
    let matches = search(std::slice::from_ref(&record), "needle");

    let expand: Vec<String> = matches[0]
        .expand_paths()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(expand, vec!["a", "a.b", "a.b[0]"]);
    for path in matches[0].expand_paths() {
        assert!(resolve(&record, &path).is_some_and(Value::is_container));
    }
}

// ---- cursor -------------------------------------------------------------

#[test]
fn engine_cursor_wraps_both_ways() {
    let records = vec![json(r#"{"a":"x","b":"x","c":"x"}"#)];
    let mut engine = SearchEngine::default();

    engine.run(&records, "x");
    assert_eq!(engine.cursor(), Some(0));

    assert_eq!(engine.advance(Direction::Prev).map(|m| m.path.to_string()), Some("c".into()));
    assert_eq!(engine.advance(Direction::Next).map(|m| m.path.to_string()), Some("a".into()));
    engine.advance(Direction::Next);
    engine.advance(Direction::Next);
    assert_eq!(engine.advance(Direction::Next).map(|m| m.path.to_string()), Some("a".into()));
}

#[test]
fn engine_resets_on_each_run() {
    let records = vec![json(r#"{"a":"x","b":"x"}"#)];
    let mut engine = SearchEngine::default();

    engine.run(&records, "x");
    engine.advance(Direction::Next);
    assert_eq!(engine.cursor(), Some(1));

    engine.run(&records, "x");
    assert_eq!(engine.cursor(), Some(0));

    engine.run(&records, "nothing");
    assert!(engine.is_empty());
    assert_eq!(engine.cursor(), None);
    assert!(engine.advance(Direction::Next).is_none());
    assert_eq!(engine.query(), "nothing");
}

// ---- properties ---------------------------------------------------------

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::int(i64::from(n))),
        "[a-c]{0,4}".prop_map(Value::Text),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec(("[a-c]{1,3}", inner), 0..4).prop_map(Value::object),
        ]
    })
}

proptest! {
    #[test]
    fn every_match_path_resolves(
        records in prop::collection::vec(arb_value(), 0..4),
        query in "[a-c1]{1,2}",
    ) {
        let matches = search(&records, &query);

        for m in &matches {
            let resolved = resolve(&records[m.record_index], &m.path);
            prop_assert_eq!(resolved, Some(&m.value));
            for ancestor in m.expand_paths() {
                prop_assert!(resolve(&records[m.record_index], &ancestor).is_some());
            }
        }

        for (i, a) in matches.iter().enumerate() {
            for b in &matches[i + 1..] {
                prop_assert!(a.record_index != b.record_index || a.path != b.path);
            }
        }
    }
}
