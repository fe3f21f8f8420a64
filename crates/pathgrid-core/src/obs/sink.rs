//! Metrics sink boundary.
//!
//! Engine logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between engine operations
//! and the thread-local metrics state.
use crate::{
    ingest::SourceFormat,
    obs::metrics::{self, bump},
    sql::Dialect,
};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// IngestFormat
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IngestFormat {
    Rejected,
    Json,
    Delimited,
}

impl From<SourceFormat> for IngestFormat {
    fn from(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Empty => Self::Rejected,
            SourceFormat::JsonArray | SourceFormat::JsonObject => Self::Json,
            SourceFormat::Delimited { .. } => Self::Delimited,
        }
    }
}

///
/// PromoteKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PromoteKind {
    Direct,
    Positional,
    Keyed,
}

///
/// ColumnEditKind
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnEditKind {
    Refresh,
    Remove,
    Reorder,
    Reset,
}

///
/// ExportKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExportKind {
    Csv,
    Json,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Ingest {
        format: IngestFormat,
        records: u64,
        diagnostic: bool,
    },
    Search {
        records: u64,
        matches: u64,
    },
    Promote {
        kind: PromoteKind,
    },
    ColumnEdit {
        kind: ColumnEditKind,
    },
    SqlGenerated {
        dialect: Dialect,
        columns: u64,
        laterals: u64,
        skipped: u64,
        degraded: u64,
    },
    Export {
        kind: ExportKind,
        rows: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::Ingest {
                format,
                records,
                diagnostic,
            } => {
                bump(&mut m.ops.ingest_calls, 1);
                match format {
                    IngestFormat::Rejected => bump(&mut m.ops.ingest_rejected, 1),
                    IngestFormat::Json => bump(&mut m.ops.ingest_json, 1),
                    IngestFormat::Delimited => bump(&mut m.ops.ingest_delimited, 1),
                }
                if diagnostic {
                    bump(&mut m.ops.ingest_diagnostics, 1);
                }
                bump(&mut m.ops.records_ingested, records);
            }

            MetricsEvent::Search { matches, .. } => {
                bump(&mut m.ops.search_calls, 1);
                bump(&mut m.ops.search_matches, matches);
            }

            MetricsEvent::Promote { kind } => match kind {
                PromoteKind::Direct => bump(&mut m.ops.promote_direct, 1),
                PromoteKind::Positional => bump(&mut m.ops.promote_positional, 1),
                PromoteKind::Keyed => bump(&mut m.ops.promote_keyed, 1),
            },

            MetricsEvent::ColumnEdit { kind } => match kind {
                ColumnEditKind::Remove => bump(&mut m.ops.column_removes, 1),
                ColumnEditKind::Reorder => bump(&mut m.ops.column_reorders, 1),
                ColumnEditKind::Reset => bump(&mut m.ops.column_resets, 1),
                ColumnEditKind::Refresh => bump(&mut m.ops.column_refreshes, 1),
            },

            MetricsEvent::SqlGenerated {
                dialect,
                columns,
                laterals,
                skipped,
                degraded,
            } => {
                bump(&mut m.ops.sql_calls, 1);
                bump(&mut m.ops.sql_columns, columns);
                bump(&mut m.ops.sql_laterals, laterals);
                bump(&mut m.ops.sql_skipped_columns, skipped);
                bump(&mut m.ops.sql_degraded_filters, degraded);
                let entry = m
                    .sql_by_dialect
                    .entry(dialect.as_str().to_string())
                    .or_default();
                bump(entry, 1);
            }

            MetricsEvent::Export { kind, rows } => {
                match kind {
                    ExportKind::Csv => bump(&mut m.ops.export_csv, 1),
                    ExportKind::Json => bump(&mut m.ops.export_json, 1),
                }
                bump(&mut m.ops.rows_exported, rows);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // Preconditions:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`.
        // - `with_metrics_sink` always restores the previous pointer before returning,
        //   including unwind paths via `Guard::drop`.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        //
        // Aliasing:
        // - Only a shared reference is materialized, matching the shared borrow
        //   used to install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's metrics counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope.
    // - `Guard` restores the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}
