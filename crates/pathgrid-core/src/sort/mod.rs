use crate::{
    path::{Path, resolve},
    value::{Value, sort_cmp},
};
use std::cmp::Ordering;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

///
/// SortState
///
/// Active sort column. Held by the column model and cleared when its
/// column is removed.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortState {
    pub path: Path,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub const fn ascending(path: Path) -> Self {
        Self {
            path,
            direction: SortDirection::Ascending,
        }
    }
}

/// Record indices in display order for `state`.
///
/// Stable: records comparing equal keep their ingestion order in both
/// directions.
#[must_use]
pub fn sort_order(records: &[Value], state: &SortState) -> Vec<usize> {
    let keys: Vec<Option<&Value>> = records
        .iter()
        .map(|record| resolve(record, &state.path))
        .collect();

    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| state.direction.apply(sort_cmp(keys[a], keys[b])));

    order
}
