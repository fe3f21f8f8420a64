//! Explicit state container.
//!
//! A `Workbench` owns the loaded records and everything derived from them.
//! Each mutation computes its new state first, assigns it, and only then
//! notifies observers with what changed.


use crate::{
    column::{ColumnModel, KeyChooser},
    export::{self, ExportOptions},
    ingest::{self, IngestOptions},
    path::Path,
    search::{Direction, Match, SearchEngine, SearchOptions},
    sort::{self, SortDirection},
    sql::{self, Dialect, SqlOptions},
    value::Value,
};

///
/// Changed
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Changed {
    Columns,
    Dialect,
    Records,
    Search,
    Sort,
}

///
/// StateObserver
///
/// Receives one call per changed part after the mutation is complete.
///

pub trait StateObserver {
    fn changed(&self, change: Changed, state: &Workbench);
}

impl<F> StateObserver for F
where
    F: Fn(Changed, &Workbench),
{
    fn changed(&self, change: Changed, state: &Workbench) {
        self(change, state);
    }
}

///
/// ObserverId
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ObserverId(u64);

///
/// WorkbenchOptions
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WorkbenchOptions {
    pub ingest: IngestOptions,
    pub search: SearchOptions,
    pub sql: SqlOptions,
    pub export: ExportOptions,
    pub dialect: Dialect,
}

///
/// Workbench
///

#[derive(Default)]
pub struct Workbench {
    records: Vec<Value>,
    detected_headers: Vec<String>,
    diagnostic: Option<String>,
    columns: ColumnModel,
    search: SearchEngine,
    dialect: Dialect,
    options: WorkbenchOptions,
    observers: Vec<(ObserverId, Box<dyn StateObserver>)>,
    next_observer: u64,
}

impl Workbench {
    #[must_use]
    pub fn new(options: WorkbenchOptions) -> Self {
        Self {
            search: SearchEngine::new(options.search),
            dialect: options.dialect,
            options,
            ..Self::default()
        }
    }

    ///
    /// OBSERVERS
    ///

    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));

        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);

        self.observers.len() != before
    }

    fn notify(&self, changes: &[Changed]) {
        for &change in changes {
            tracing::trace!(change = ?change, "state: notify");
            for (_, observer) in &self.observers {
                observer.changed(change, self);
            }
        }
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    #[must_use]
    pub fn detected_headers(&self) -> &[String] {
        &self.detected_headers
    }

    /// Status message from the last load, if any.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    #[must_use]
    pub const fn columns(&self) -> &ColumnModel {
        &self.columns
    }

    #[must_use]
    pub const fn search_results(&self) -> &SearchEngine {
        &self.search
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Cell value for display; `None` is an absent cell.
    #[must_use]
    pub fn cell(&self, record_index: usize, path: &Path) -> Option<&Value> {
        self.records
            .get(record_index)
            .and_then(|record| crate::path::resolve(record, path))
    }

    /// Record indices in display order under the active sort.
    #[must_use]
    pub fn row_order(&self) -> Vec<usize> {
        match self.columns.sort() {
            Some(state) => sort::sort_order(&self.records, state),
            None => (0..self.records.len()).collect(),
        }
    }

    ///
    /// RECORDS
    ///

    /// Ingest raw text and replace the records wholesale. Columns reset to
    /// the natural columns of the new data; known paths are kept. Returns
    /// the diagnostic, if any.
    pub fn load(&mut self, raw: &str) -> Option<&str> {
        let ingested = ingest::ingest_with(raw, &self.options.ingest);
        self.replace_records(
            ingested.records,
            ingested.detected_headers,
            ingested.diagnostic,
        );

        self.diagnostic()
    }

    /// Replace the records with an already parsed dataset.
    pub fn apply_records(&mut self, records: Vec<Value>) {
        self.replace_records(records, Vec::new(), None);
    }

    fn replace_records(
        &mut self,
        records: Vec<Value>,
        detected_headers: Vec<String>,
        diagnostic: Option<String>,
    ) {
        let mut columns = self.columns.clone();
        columns.reset_to_natural(&records, &detected_headers);
        columns.refresh_known_paths(&records);

        self.records = records;
        self.detected_headers = detected_headers;
        self.diagnostic = diagnostic;
        self.columns = columns;
        self.search.clear();
        self.check_columns();

        self.notify(&[Changed::Records, Changed::Columns, Changed::Search]);
    }

    ///
    /// COLUMNS
    ///

    /// Promote `path` as browsed in record `record_index`. `None` when the
    /// record does not exist.
    pub fn promote(
        &mut self,
        record_index: usize,
        path: &Path,
        chooser: &dyn KeyChooser,
    ) -> Option<Path> {
        let record = self.records.get(record_index)?;
        let promoted = self.columns.promote(record, path, chooser);
        self.check_columns();

        self.notify(&[Changed::Columns]);

        Some(promoted)
    }

    /// Re-show a known path.
    pub fn show_column(&mut self, path: Path) -> bool {
        let shown = self.columns.show(path);
        if shown {
            self.notify(&[Changed::Columns]);
        }

        shown
    }

    pub fn remove_column(&mut self, path: &Path) -> bool {
        let had_sort = self.columns.sort().is_some();
        let removed = self.columns.remove(path);
        if !removed {
            return false;
        }

        if had_sort && self.columns.sort().is_none() {
            self.notify(&[Changed::Columns, Changed::Sort]);
        } else {
            self.notify(&[Changed::Columns]);
        }

        true
    }

    pub fn reorder_columns(&mut self, source: &Path, target: &Path) -> bool {
        let moved = self.columns.reorder(source, target);
        if moved {
            self.notify(&[Changed::Columns]);
        }

        moved
    }

    pub fn reset_columns(&mut self) {
        let sort_before = self.columns.sort().cloned();
        self.columns
            .reset_to_natural(&self.records, &self.detected_headers);
        self.check_columns();

        if sort_before.as_ref() == self.columns.sort() {
            self.notify(&[Changed::Columns]);
        } else {
            self.notify(&[Changed::Columns, Changed::Sort]);
        }
    }

    ///
    /// SORT
    ///

    pub fn toggle_sort(&mut self, path: &Path) {
        if self.columns.toggle_sort(path).is_some() {
            self.notify(&[Changed::Sort]);
        }
    }

    pub fn set_sort(&mut self, path: &Path, direction: SortDirection) -> bool {
        let set = self.columns.set_sort(path, direction);
        if set {
            self.notify(&[Changed::Sort]);
        }

        set
    }

    pub fn clear_sort(&mut self) {
        self.columns.clear_sort();
        self.notify(&[Changed::Sort]);
    }

    ///
    /// SEARCH
    ///

    /// Search the loaded records; returns the number of matches.
    pub fn search(&mut self, query: &str) -> usize {
        let count = self.search.run(&self.records, query).len();
        self.notify(&[Changed::Search]);

        count
    }

    pub fn advance(&mut self, direction: Direction) -> Option<&Match> {
        if self.search.is_empty() {
            return None;
        }
        self.search.advance(direction);
        self.notify(&[Changed::Search]);

        self.search.current()
    }

    ///
    /// OUTPUT
    ///

    pub fn set_dialect(&mut self, dialect: Dialect) {
        if self.dialect != dialect {
            self.dialect = dialect;
            self.notify(&[Changed::Dialect]);
        }
    }

    /// SELECT statement for the visible columns in the current dialect.
    #[must_use]
    pub fn sql(&self) -> String {
        sql::generate_sql_with(self.columns.visible(), self.dialect, &self.options.sql)
    }

    /// CSV of the visible columns, rows in display order.
    #[must_use]
    pub fn csv(&self) -> String {
        let rows = self.rows_in_order();
        export::to_csv_with(&rows, self.columns.visible(), &self.options.export)
    }

    /// JSON projection of the visible columns, rows in display order.
    #[must_use]
    pub fn json(&self) -> Value {
        export::to_json(&self.rows_in_order(), self.columns.visible())
    }

    fn rows_in_order(&self) -> Vec<Value> {
        self.row_order()
            .into_iter()
            .filter_map(|i| self.records.get(i).cloned())
            .collect()
    }

    fn check_columns(&self) {
        if let Err(err) = self.columns.check_invariants() {
            tracing::error!(error = %err.display_with_class(), "state: column invariant violated");
        }
    }
}
