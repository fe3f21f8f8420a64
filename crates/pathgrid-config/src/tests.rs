use crate::{Config, ConfigError};
use pathgrid_core::{sql::Dialect, state::WorkbenchOptions};

#[test]
fn empty_document_uses_defaults() {
    let config = Config::from_toml_str("").expect("config");

    assert_eq!(config, Config::default());
    assert_eq!(config.ingest.placeholder_prefix, "column_");
    assert!(config.ingest.parse_json_cells);
    assert_eq!(config.sql.dialect, Dialect::PostgreSql);
    assert_eq!(config.sql.table, "my_table");
    assert_eq!(config.export.preview_chars, 15);
    assert_eq!(WorkbenchOptions::from(&config), WorkbenchOptions::default());
}

#[test]
fn sections_override_defaults() {
    let config = Config::from_toml_str(
        r#"
        [sql]
        dialect = "snowflake"
        table = "raw.events"

        [search]
        max_matches = 50
        "#,
    )
    .expect("config");

    let options = WorkbenchOptions::from(&config);
    assert_eq!(options.dialect, Dialect::Snowflake);
    assert_eq!(options.sql.table, "raw.events");
    assert_eq!(options.search.max_matches, 50);
    assert_eq!(options.export.preview_chars, 15);
}

#[test]
fn unknown_dialect_is_a_toml_error() {
    let err = Config::from_toml_str("[sql]\ndialect = \"mysql\"").expect_err("error");

    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = Config::from_toml_str("[export]\npreview = 3").expect_err("error");

    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn validation_rejects_empty_table_and_zero_preview() {
    let err = Config::from_toml_str("[sql]\ntable = \"  \"").expect_err("error");
    assert!(matches!(err, ConfigError::Invalid(message) if message.contains("sql.table")));

    let err = Config::from_toml_str("[export]\npreview_chars = 0").expect_err("error");
    assert!(matches!(err, ConfigError::Invalid(message) if message.contains("preview_chars")));
}

#[test]
fn load_reports_missing_file() {
    let err = Config::load("/nonexistent/pathgrid.toml").expect_err("error");

    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/pathgrid.toml"));
}

#[test]
fn load_reads_a_file() {
    let path = std::env::temp_dir().join(format!("pathgrid-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[ingest]\nparse_json_cells = false\n").expect("write");

    let config = Config::load(&path).expect("config");
    let _ = std::fs::remove_file(&path);

    assert!(!config.ingest.parse_json_cells);
}
