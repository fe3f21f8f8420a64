//! Raw text ingestion: JSON first, then delimited text, then an empty result
//! carrying a diagnostic. Ingestion never fails outward.

mod cell;
mod delimited;

#[cfg(test)]
mod tests;

use crate::{
    error::InternalError,
    obs::sink::{self, IngestFormat, MetricsEvent},
    value::Value,
};
use thiserror::Error as ThisError;

// re-exports
pub use cell::parse_cell;
pub use delimited::{Delimited, detect_delimiter, parse_delimited, parse_delimited_with};

///
/// IngestError
///
/// Internal failure classification. Never returned from [`ingest`]; it is
/// rendered into [`Ingested::diagnostic`].
///

#[derive(Debug, ThisError)]
pub enum IngestError {
    #[error("input is empty")]
    Empty,

    #[error("input has no header row")]
    NoHeader,

    #[error("input is not valid JSON ({json}) and has no delimited rows")]
    Unparseable { json: String },
}

///
/// IngestOptions
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IngestOptions {
    /// Blank header cells are named `<prefix><1-based position>`.
    pub placeholder_prefix: String,
    /// Speculatively parse cells that look like JSON objects/arrays.
    pub parse_json_cells: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            placeholder_prefix: crate::DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            parse_json_cells: true,
        }
    }
}

///
/// SourceFormat
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceFormat {
    Empty,
    JsonArray,
    JsonObject,
    Delimited { delimiter: char },
}

///
/// Ingested
///
/// Records plus the header row detected for delimited input (empty for
/// JSON). `diagnostic` carries a short status message for the caller when
/// input was rejected or loaded through a fallback.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Ingested {
    pub records: Vec<Value>,
    pub detected_headers: Vec<String>,
    pub format: SourceFormat,
    pub diagnostic: Option<String>,
}

impl Ingested {
    fn empty(diagnostic: String) -> Self {
        Self {
            records: Vec::new(),
            detected_headers: Vec::new(),
            format: SourceFormat::Empty,
            diagnostic: Some(diagnostic),
        }
    }
}

/// Ingest raw text with default options.
#[must_use]
pub fn ingest(raw: &str) -> Ingested {
    ingest_with(raw, &IngestOptions::default())
}

/// Ingest raw text. Never fails; total failure yields no records and a
/// diagnostic.
#[must_use]
pub fn ingest_with(raw: &str, options: &IngestOptions) -> Ingested {
    let ingested = match try_ingest(raw, options) {
        Ok(ingested) => ingested,
        Err(err) => {
            let err = InternalError::from(err);
            tracing::warn!(error = %err.display_with_class(), "ingest: rejected input");
            Ingested::empty(err.message)
        }
    };

    sink::record(MetricsEvent::Ingest {
        format: IngestFormat::from(ingested.format),
        records: ingested.records.len() as u64,
        diagnostic: ingested.diagnostic.is_some(),
    });

    ingested
}

fn try_ingest(raw: &str, options: &IngestOptions) -> Result<Ingested, IngestError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IngestError::Empty);
    }

    let json_error = match Value::from_json_str(trimmed) {
        Ok(Value::Array(records)) => {
            tracing::debug!(records = records.len(), "ingest: JSON array");
            return Ok(Ingested {
                records,
                detected_headers: Vec::new(),
                format: SourceFormat::JsonArray,
                diagnostic: None,
            });
        }
        Ok(record @ Value::Object(_)) => {
            tracing::debug!("ingest: JSON object wrapped as one record");
            return Ok(Ingested {
                records: vec![record],
                detected_headers: Vec::new(),
                format: SourceFormat::JsonObject,
                diagnostic: None,
            });
        }
        Ok(other) => format!("top-level {} is not a record", other.tag().label()),
        Err(err) => err.to_string(),
    };

    let delimiter = detect_delimiter(raw);
    let parsed = parse_delimited_with(raw, delimiter, options);
    if parsed.headers.is_empty() {
        return Err(IngestError::NoHeader);
    }
    if parsed.records.is_empty() {
        return Err(IngestError::Unparseable { json: json_error });
    }

    // JSON-looking input that fell through deserves a note to the caller.
    let looked_like_json = trimmed.starts_with('[') || trimmed.starts_with('{');
    let diagnostic = looked_like_json.then(|| {
        tracing::warn!(error = %json_error, "ingest: JSON parse failed, loaded as delimited text");
        format!("JSON parse failed ({json_error}); loaded as delimited text")
    });

    tracing::debug!(
        records = parsed.records.len(),
        delimiter = ?delimiter,
        "ingest: delimited text"
    );

    Ok(Ingested {
        records: parsed.records,
        detected_headers: parsed.headers,
        format: SourceFormat::Delimited { delimiter },
        diagnostic,
    })
}
