use crate::{
    error::InternalError,
    obs::sink::{self, ExportKind, MetricsEvent},
    path::{Path, resolve},
    value::{Value, ValueMap},
};

/// Project each record onto `columns` as an object keyed by column label.
/// Absent cells are omitted; values are copied whole.
#[must_use]
pub fn to_json(records: &[Value], columns: &[Path]) -> Value {
    let rows = records
        .iter()
        .map(|record| {
            let row: ValueMap = columns
                .iter()
                .filter_map(|path| resolve(record, path).map(|value| (path.to_string(), value.clone())))
                .collect();

            Value::Object(row)
        })
        .collect();

    sink::record(MetricsEvent::Export {
        kind: ExportKind::Json,
        rows: records.len() as u64,
    });

    Value::Array(rows)
}

/// Pretty-printed JSON text of [`to_json`].
pub fn to_json_string(records: &[Value], columns: &[Path]) -> Result<String, InternalError> {
    let projected = to_json(records, columns);

    serde_json::to_string_pretty(&projected)
        .map_err(|err| InternalError::export_internal(format!("JSON serialization failed: {err}")))
}
