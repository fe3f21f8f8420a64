use crate::{
    path::{Path, Segment},
    value::Value,
};

/// Evaluate `path` against `record`.
///
/// Returns `None` (absent) for a missing member, an out-of-range index, an
/// unmatched filter, or any segment applied to a value of the wrong kind.
/// `Some(&Value::Null)` is a present null.
#[must_use]
pub fn resolve<'a>(record: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(record, |current, segment| step(current, segment))
}

/// Parse-and-resolve for string paths; a malformed path is absent.
#[must_use]
pub fn resolve_str<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let path = Path::parse(path).ok()?;

    resolve(record, &path)
}

fn step<'a>(current: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match segment {
        Segment::Key(name) => current.get(name),
        Segment::Index(index) => current.index(*index),
        Segment::Filter { field, value } => current
            .as_array()?
            .iter()
            .find(|element| filter_matches(element, field, value)),
    }
}

/// True when `element` is an object whose `field` member renders as `value`.
/// Elements without the member never match.
fn filter_matches(element: &Value, field: &str, value: &str) -> bool {
    element
        .get(field)
        .is_some_and(|member| member.display_text() == value)
}
