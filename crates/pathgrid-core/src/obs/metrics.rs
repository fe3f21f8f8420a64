use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for the current thread.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) sql_by_dialect: BTreeMap<String, u64>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Ingestion
    pub ingest_calls: u64,
    pub ingest_json: u64,
    pub ingest_delimited: u64,
    pub ingest_rejected: u64,
    pub ingest_diagnostics: u64,
    pub records_ingested: u64,

    // Search
    pub search_calls: u64,
    pub search_matches: u64,

    // Column model
    pub promote_direct: u64,
    pub promote_positional: u64,
    pub promote_keyed: u64,
    pub column_removes: u64,
    pub column_reorders: u64,
    pub column_resets: u64,
    pub column_refreshes: u64,

    // SQL generation
    pub sql_calls: u64,
    pub sql_columns: u64,
    pub sql_laterals: u64,
    pub sql_skipped_columns: u64,
    pub sql_degraded_filters: u64,

    // Export
    pub export_csv: u64,
    pub export_json: u64,
    pub rows_exported: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub sql_by_dialect: BTreeMap<String, u64>,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Snapshot the counters.
pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        ops: m.ops.clone(),
        sql_by_dialect: m.sql_by_dialect.clone(),
    })
}

/// Saturating counter bump.
pub(crate) const fn bump(counter: &mut u64, by: u64) {
    *counter = counter.saturating_add(by);
}
