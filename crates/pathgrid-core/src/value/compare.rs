use crate::value::{Value, canonical_rank};
use serde_json::Number;
use std::{borrow::Cow, cmp::Ordering};

/// Total comparator for column sorting over possibly-absent cells.
///
/// Ordering rules:
/// 1. Absent before present
/// 2. Canonical kind rank
/// 3. Kind-specific comparison for same-ranked values
#[must_use]
pub fn sort_cmp(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => {
            let rank = canonical_rank(left).cmp(&canonical_rank(right));
            if rank != Ordering::Equal {
                return rank;
            }

            cmp_same_rank(left, right)
        }
    }
}

fn cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => cmp_number(a, b),
        (Value::Text(a), Value::Text(b)) => fold_ci(a).cmp(&fold_ci(b)).then_with(|| a.cmp(b)),
        (Value::Array(a), Value::Array(b)) => a.len().cmp(&b.len()),
        (Value::Object(a), Value::Object(b)) => a.len().cmp(&b.len()),
        _ => Ordering::Equal,
    }
}

fn cmp_number(left: &Number, right: &Number) -> Ordering {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return a.cmp(&b);
    }

    let a = left.as_f64().unwrap_or(f64::NAN);
    let b = right.as_f64().unwrap_or(f64::NAN);

    a.total_cmp(&b)
}

/// Case fold used by search and text ordering.
///
/// Folding is per character so the folded text keeps the same character
/// count as the input; search offsets index the original text.
#[must_use]
pub fn fold_ci(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(s.to_ascii_lowercase());
        }
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.chars()
            .map(|c| c.to_lowercase().next().unwrap_or(c))
            .collect(),
    )
}
