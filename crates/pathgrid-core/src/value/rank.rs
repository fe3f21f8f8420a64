use crate::value::{Value, tag};

///
/// Canonical Value Rank
///
/// Stable rank used for cross-kind ordering when sorting a column.
/// Absent cells sort before every rank; see `sort_cmp`.
///
#[must_use]
pub const fn canonical_rank(value: &Value) -> u8 {
    // Tags are 1-based; rank is 0-based.
    tag::canonical_tag(value).to_u8() - 1
}
