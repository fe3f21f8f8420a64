use crate::{
    ingest::{
        IngestOptions, SourceFormat, detect_delimiter, ingest, ingest_with, parse_delimited,
    },
    path::resolve_str,
    value::Value,
};

// ---- delimiter detection -----------------------------------------------

#[test]
fn detect_delimiter_counts_first_line_only() {
    assert_eq!(detect_delimiter("a,b\tc,d"), ',');
    assert_eq!(detect_delimiter("a\tb\tc\n1,2,3,4,5"), '\t');
    assert_eq!(detect_delimiter("a|b|c"), '|');
}

#[test]
fn detect_delimiter_defaults_to_comma() {
    assert_eq!(detect_delimiter(""), ',');
    assert_eq!(detect_delimiter("single"), ',');
    assert_eq!(detect_delimiter("\na\tb"), ',');
}

// ---- delimited parsing -------------------------------------------------

#[test]
fn parse_delimited_uses_first_non_blank_row_as_headers() {
    let parsed = parse_delimited("\n,,\nname,age\nann,31\n,\nbob,\n", ',');

    assert_eq!(parsed.headers, vec!["name", "age"]);
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.records[1].get("age"), Some(&Value::text("")));
}

#[test]
fn parse_delimited_names_blank_headers_by_position() {
    let parsed = parse_delimited("id,,note\n1,x,y", ',');

    assert_eq!(parsed.headers, vec!["id", "column_2", "note"]);
    assert_eq!(parsed.records[0].get("column_2"), Some(&Value::text("x")));
}

#[test]
fn parse_delimited_pads_short_rows_and_drops_extra_cells() {
    let parsed = parse_delimited("a,b\n1\n2,3,4", ',');

    assert_eq!(parsed.records[0].get("b"), Some(&Value::text("")));
    let keys: Vec<&str> = parsed.records[1]
        .as_object()
        .expect("object record")
        .keys()
        .collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn parse_delimited_parses_json_cells() {
    let parsed = parse_delimited("id\tpayload\n1\t{\"tags\":[\"x\",\"y\"]}", '\t');

    assert_eq!(
        resolve_str(&parsed.records[0], "payload.tags[1]"),
        Some(&Value::text("y"))
    );
}

#[test]
fn json_cell_parsing_can_be_disabled() {
    let options = IngestOptions {
        parse_json_cells: false,
        ..IngestOptions::default()
    };
    let ingested = ingest_with("id,payload\n1,[1]", &options);

    assert_eq!(ingested.records[0].get("payload"), Some(&Value::text("[1]")));
}

// ---- ingest ------------------------------------------------------------

#[test]
fn ingest_json_array_keeps_records() {
    let ingested = ingest(r#"[{"a":1},{"a":2}]"#);

    assert_eq!(ingested.format, SourceFormat::JsonArray);
    assert_eq!(ingested.records.len(), 2);
    assert!(ingested.detected_headers.is_empty());
    assert!(ingested.diagnostic.is_none());
}

#[test]
fn ingest_json_object_wraps_single_record() {
    let ingested = ingest(r#"  {"a":{"b":true}}  "#);

    assert_eq!(ingested.format, SourceFormat::JsonObject);
    assert_eq!(ingested.records.len(), 1);
    assert_eq!(resolve_str(&ingested.records[0], "a.b"), Some(&Value::Bool(true)));
}

#[test]
fn ingest_routes_non_json_to_delimited() {
    let ingested = ingest("name|city\nann|Oslo\n");

    assert_eq!(ingested.format, SourceFormat::Delimited { delimiter: '|' });
    assert_eq!(ingested.detected_headers, vec!["name", "city"]);
    assert_eq!(ingested.records[0].get("city"), Some(&Value::text("Oslo")));
    assert!(ingested.diagnostic.is_none());
}

#[test]
fn ingest_notes_json_fallback() {
    let ingested = ingest("[broken,\nrow,2");

    assert!(matches!(ingested.format, SourceFormat::Delimited { .. }));
    let diagnostic = ingested.diagnostic.expect("fallback diagnostic");
    assert!(diagnostic.starts_with("JSON parse failed"));
}

#[test]
fn ingest_empty_input_yields_diagnostic() {
    let ingested = ingest("   \n ");

    assert_eq!(ingested.format, SourceFormat::Empty);
    assert!(ingested.records.is_empty());
    assert_eq!(ingested.diagnostic.as_deref(), Some("input is empty"));
}

#[test]
fn ingest_scalar_json_without_rows_is_rejected() {
    let ingested = ingest("42");

    assert!(ingested.records.is_empty());
    let diagnostic = ingested.diagnostic.expect("diagnostic");
    assert!(diagnostic.contains("top-level Number is not a record"));
}
