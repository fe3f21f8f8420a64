//! Column model: the ordered visible column list, the monotonic set of
//! known paths, and the active sort.
//!
//! Every visible column is also a known path. Removing a column keeps it
//! known so it can be re-added.

mod promote;
mod unique_list;


use crate::{
    error::InternalError,
    obs::sink::{self, ColumnEditKind, MetricsEvent},
    path::Path,
    sort::{SortDirection, SortState},
    value::Value,
};
use std::collections::BTreeSet;

// re-exports
pub use promote::{
    KeyCandidate, KeyChoice, KeyChoiceRequest, KeyChooser, Positional, PreferredKeys,
    key_choice_request,
};
pub use unique_list::UniqueList;

///
/// Column
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Column {
    pub path: Path,
    pub label: String,
}

impl From<&Path> for Column {
    fn from(path: &Path) -> Self {
        Self {
            path: path.clone(),
            label: path.to_string(),
        }
    }
}

///
/// ColumnModel
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColumnModel {
    visible: UniqueList<Path>,
    known: BTreeSet<Path>,
    sort: Option<SortState>,
}

impl ColumnModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Model showing the natural columns of freshly ingested data.
    #[must_use]
    pub fn natural(records: &[Value], detected_headers: &[String]) -> Self {
        let mut model = Self::new();
        model.reset_to_natural(records, detected_headers);
        model.refresh_known_paths(records);

        model
    }

    ///
    /// ACCESSORS
    ///

    /// Visible columns in display order.
    #[must_use]
    pub fn visible(&self) -> &[Path] {
        self.visible.as_slice()
    }

    #[must_use]
    pub const fn known(&self) -> &BTreeSet<Path> {
        &self.known
    }

    /// Known paths that are not currently visible, for a re-add menu.
    #[must_use]
    pub fn hidden(&self) -> Vec<&Path> {
        self.known
            .iter()
            .filter(|path| !self.visible.contains(path))
            .collect()
    }

    #[must_use]
    pub fn columns(&self) -> Vec<Column> {
        self.visible.iter().map(Column::from).collect()
    }

    #[must_use]
    pub fn is_visible(&self, path: &Path) -> bool {
        self.visible.contains(path)
    }

    #[must_use]
    pub const fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    ///
    /// COLUMN EDITS
    ///

    /// Promote a browsed path into a visible column.
    ///
    /// Members of array elements may be re-keyed by `chooser` (see
    /// [`KeyChooser`]). Returns the path actually added; adding an already
    /// visible path is a no-op.
    pub fn promote(&mut self, record: &Value, path: &Path, chooser: &dyn KeyChooser) -> Path {
        let (promoted, kind) = promote::promoted_path(record, path, chooser);
        tracing::debug!(path = %path, promoted = %promoted, kind = ?kind, "column: promote");

        self.show(promoted.clone());
        sink::record(MetricsEvent::Promote { kind });

        promoted
    }

    /// Show a path as-is, e.g. re-adding a previously removed column.
    /// Returns `true` if it was not already visible.
    pub fn show(&mut self, path: Path) -> bool {
        self.known.insert(path.clone());

        self.visible.insert(path)
    }

    /// Hide a column; it stays known. Clears the sort if it sorted on it.
    pub fn remove(&mut self, path: &Path) -> bool {
        let removed = self.visible.remove(path);
        if removed && self.sort.as_ref().is_some_and(|s| &s.path == path) {
            self.sort = None;
        }

        sink::record(MetricsEvent::ColumnEdit {
            kind: ColumnEditKind::Remove,
        });

        removed
    }

    /// Move `source` to just before `target`. No-op when either is not
    /// visible or both are the same column.
    pub fn reorder(&mut self, source: &Path, target: &Path) -> bool {
        let moved = self.visible.move_before(source, target);

        sink::record(MetricsEvent::ColumnEdit {
            kind: ColumnEditKind::Reorder,
        });

        moved
    }

    /// Union every record's top-level keys and the visible columns into the
    /// known paths. Known paths are never forgotten.
    pub fn refresh_known_paths(&mut self, records: &[Value]) {
        let mut known = self.known.clone();
        known.extend(records.iter().flat_map(top_level_paths));
        known.extend(self.visible.iter().cloned());
        self.known = known;

        sink::record(MetricsEvent::ColumnEdit {
            kind: ColumnEditKind::Refresh,
        });
    }

    /// Show the natural columns: the detected headers when present, else
    /// the top-level keys of the first record.
    pub fn reset_to_natural(&mut self, records: &[Value], detected_headers: &[String]) {
        let natural: Vec<Path> = if detected_headers.is_empty() {
            records.first().map(top_level_paths).unwrap_or_default()
        } else {
            detected_headers.iter().map(Path::key).collect()
        };

        let visible = UniqueList::from_vec(natural);
        self.known.extend(visible.iter().cloned());
        self.visible = visible;

        if self
            .sort
            .as_ref()
            .is_some_and(|s| !self.visible.contains(&s.path))
        {
            self.sort = None;
        }

        sink::record(MetricsEvent::ColumnEdit {
            kind: ColumnEditKind::Reset,
        });
    }

    ///
    /// SORT
    ///

    /// Sort on a visible column. Returns `false` if `path` is not visible.
    pub fn set_sort(&mut self, path: &Path, direction: SortDirection) -> bool {
        if !self.visible.contains(path) {
            return false;
        }

        self.sort = Some(SortState {
            path: path.clone(),
            direction,
        });

        true
    }

    /// Header-click behaviour: a new column sorts ascending, the current
    /// sort column flips direction. Returns `None`, leaving any existing
    /// sort untouched, when `path` is not visible.
    pub fn toggle_sort(&mut self, path: &Path) -> Option<&SortState> {
        let direction = match &self.sort {
            Some(sort) if &sort.path == path => sort.direction.reversed(),
            _ => SortDirection::Ascending,
        };
        if !self.set_sort(path, direction) {
            return None;
        }

        self.sort.as_ref()
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    ///
    /// INVARIANTS
    ///

    /// Check that every visible column is known and the sort column is
    /// visible.
    pub fn check_invariants(&self) -> Result<(), InternalError> {
        if let Some(path) = self.visible.iter().find(|path| !self.known.contains(*path)) {
            return Err(InternalError::column_invariant(format!(
                "visible column '{path}' is not a known path"
            )));
        }

        if let Some(sort) = &self.sort
            && !self.visible.contains(&sort.path)
        {
            return Err(InternalError::column_invariant(format!(
                "sort column '{}' is not visible",
                sort.path
            )));
        }

        Ok(())
    }
}

fn top_level_paths(record: &Value) -> Vec<Path> {
    record
        .as_object()
        .map(|object| object.keys().map(Path::key).collect())
        .unwrap_or_default()
}
