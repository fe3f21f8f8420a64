use crate::path::{PathParseError, Segment};

/// Split a path string into raw segment strings.
///
/// `.` outside brackets separates segments and is dropped; bracketed
/// segments are kept verbatim, brackets included. Inside a bracket a
/// double-quoted literal may contain `.`, `]` and backslash escapes.
/// Empty tokens are skipped.
#[must_use]
pub fn split_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;
    let mut in_quotes = false;
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        if in_bracket {
            current.push(c);
            match c {
                '\\' if in_quotes => {
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                }
                '"' => in_quotes = !in_quotes,
                ']' if !in_quotes => {
                    in_bracket = false;
                    segments.push(std::mem::take(&mut current));
                }
                _ => {}
            }
            continue;
        }

        match c {
            '.' => flush(&mut segments, &mut current),
            '[' => {
                flush(&mut segments, &mut current);
                in_bracket = true;
                current.push(c);
            }
            _ => current.push(c),
        }
    }

    // an unterminated bracket is kept so the parser can reject it
    flush(&mut segments, &mut current);

    segments
}

fn flush(segments: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

pub(crate) fn parse_segments(path: &str) -> Result<Vec<Segment>, PathParseError> {
    let raw = split_path(path);
    if raw.is_empty() {
        return Err(PathParseError::Empty);
    }

    raw.into_iter().map(parse_segment).collect()
}

fn parse_segment(raw: String) -> Result<Segment, PathParseError> {
    if !raw.starts_with('[') {
        return Ok(Segment::Key(raw));
    }
    if raw.len() < 2 || !raw.ends_with(']') {
        return Err(PathParseError::Unterminated { segment: raw });
    }

    let inner = &raw[1..raw.len() - 1];
    if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
        return inner
            .parse::<usize>()
            .map(Segment::Index)
            .map_err(|_| invalid(&raw));
    }

    parse_filter(inner, &raw)
}

// `field="value"`: the field runs to the first `=`, the literal is the rest
// and must be fully quoted.
fn parse_filter(inner: &str, raw: &str) -> Result<Segment, PathParseError> {
    let Some((field, literal)) = inner.split_once('=') else {
        return Err(invalid(raw));
    };
    let quoted = literal.len() >= 2 && literal.starts_with('"') && literal.ends_with('"');
    if !quoted {
        return Err(invalid(raw));
    }
    if field.is_empty() {
        return Err(PathParseError::EmptyFilterField {
            segment: raw.to_string(),
        });
    }

    Ok(Segment::Filter {
        field: field.to_string(),
        value: unescape_filter_value(&literal[1..literal.len() - 1]),
    })
}

fn invalid(raw: &str) -> PathParseError {
    PathParseError::InvalidBracket {
        segment: raw.to_string(),
    }
}

/// Escape a filter literal for the string form: `\` and `"` gain a backslash.
pub(crate) fn escape_filter_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            out.push('\\');
        }
        out.push(c);
    }

    out
}

// Inverse of `escape_filter_value`; a backslash before any other character
// is kept verbatim.
fn unescape_filter_value(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && matches!(next, '\\' | '"')
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }

    out
}
