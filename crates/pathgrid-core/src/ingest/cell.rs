use crate::value::Value;

/// Post-process one delimited cell.
///
/// Text shaped like a JSON object or array literal is parsed speculatively,
/// with one repair pass that collapses doubled quotes left behind by naive
/// CSV writers. Anything else, or a literal that still fails, stays text.
#[must_use]
pub fn parse_cell(raw: String) -> Value {
    let trimmed = raw.trim();
    if !looks_like_json_container(trimmed) {
        return Value::Text(raw);
    }

    if let Ok(value) = Value::from_json_str(trimmed) {
        return value;
    }

    let repaired = trimmed.replace("\"\"", "\"");
    match Value::from_json_str(&repaired) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "ingest: JSON-looking cell kept as text");
            Value::Text(raw)
        }
    }
}

fn looks_like_json_container(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'))
}
