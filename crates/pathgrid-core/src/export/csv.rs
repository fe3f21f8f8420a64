use crate::{
    export::ExportOptions,
    obs::sink::{self, ExportKind, MetricsEvent},
    path::{Path, resolve},
    value::Value,
};
use std::borrow::Cow;

/// CSV export with default options.
#[must_use]
pub fn to_csv(records: &[Value], columns: &[Path]) -> String {
    to_csv_with(records, columns, &ExportOptions::default())
}

/// Render a header row of column labels and one row per record.
///
/// Null and absent cells are empty. Object and array cells are summarized
/// as a tagged JSON preview. Rows end with `\n`.
#[must_use]
pub fn to_csv_with(records: &[Value], columns: &[Path], options: &ExportOptions) -> String {
    let mut out = String::new();

    let header: Vec<String> = columns.iter().map(ToString::to_string).collect();
    push_row(&mut out, header.iter().map(String::as_str));

    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .map(|path| cell_text(resolve(record, path), options.preview_chars))
            .collect();
        push_row(&mut out, cells.iter().map(String::as_str));
    }

    tracing::debug!(rows = records.len(), columns = columns.len(), "export: csv");
    sink::record(MetricsEvent::Export {
        kind: ExportKind::Csv,
        rows: records.len() as u64,
    });

    out
}

fn cell_text(value: Option<&Value>, preview_chars: usize) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value @ Value::Object(_)) => format!("<Json Object> {}", preview(value, preview_chars)),
        Some(value @ Value::Array(_)) => format!("<Json Array> {}", preview(value, preview_chars)),
        Some(value) => value.display_text(),
    }
}

fn preview(value: &Value, chars: usize) -> String {
    let json = value.to_json_string();

    match json.char_indices().nth(chars) {
        Some((cut, _)) => format!("{}...", &json[..cut]),
        None => json,
    }
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape(cell));
    }
    out.push('\n');
}

fn escape(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '\n', '\r', '"']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}
