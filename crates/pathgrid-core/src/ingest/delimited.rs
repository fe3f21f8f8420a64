use crate::{
    ingest::{IngestOptions, cell::parse_cell},
    value::{Value, ValueMap},
};

/// Delimiters considered by detection, in tie-break order.
const CANDIDATES: [char; 3] = [',', '\t', '|'];

///
/// Delimited
///
/// Parsed delimited text: the effective header row and one object record per
/// non-blank data row, keyed by header.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Delimited {
    pub headers: Vec<String>,
    pub records: Vec<Value>,
}

/// Pick the delimiter occurring most often on the first line.
/// Blank samples and lines without any candidate default to `,`.
#[must_use]
pub fn detect_delimiter(sample: &str) -> char {
    let first_line = sample.lines().next().unwrap_or_default();

    let mut best = (',', 0usize);
    for candidate in CANDIDATES {
        let count = first_line.chars().filter(|c| *c == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }

    best.0
}

/// Parse delimited text with default options.
#[must_use]
pub fn parse_delimited(text: &str, delimiter: char) -> Delimited {
    parse_delimited_with(text, delimiter, &IngestOptions::default())
}

/// Parse delimited text into records.
///
/// The first non-blank row is the header; blank header cells get a
/// positional placeholder name. Short rows are padded with empty text,
/// cells past the header width are dropped.
#[must_use]
pub fn parse_delimited_with(text: &str, delimiter: char, options: &IngestOptions) -> Delimited {
    let mut rows = scan_rows(text, delimiter)
        .into_iter()
        .filter(|row| !is_blank_row(row));

    let Some(header_row) = rows.next() else {
        return Delimited::default();
    };

    let headers: Vec<String> = header_row
        .into_iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell.trim();
            if name.is_empty() {
                format!("{}{}", options.placeholder_prefix, i + 1)
            } else {
                name.to_string()
            }
        })
        .collect();

    let records = rows
        .map(|row| {
            if row.len() > headers.len() {
                tracing::debug!(
                    cells = row.len(),
                    headers = headers.len(),
                    "ingest: dropping cells past header width"
                );
            }

            let mut cells = row.into_iter();
            let map: ValueMap = headers
                .iter()
                .map(|header| {
                    let cell = cells.next().unwrap_or_default();
                    let value = if options.parse_json_cells {
                        parse_cell(cell)
                    } else {
                        Value::Text(cell)
                    };
                    (header.clone(), value)
                })
                .collect();

            Value::Object(map)
        })
        .collect();

    Delimited { headers, records }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

// Quoted-field scanner. Quotes open only at the start of a field; inside
// quotes the delimiter and line breaks are literal and `""` is one quote.
fn scan_rows(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut field_started = false;
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                field_started = false;
            }
            c if c == delimiter => {
                row.push(std::mem::take(&mut field));
                field_started = false;
            }
            c => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if field_started || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
