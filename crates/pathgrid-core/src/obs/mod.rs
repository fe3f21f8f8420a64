//! Observability: in-process operation counters and the sink boundary.
//!
//! Engine modules never touch `metrics` directly; they emit
//! `sink::MetricsEvent` values and the active sink decides what to keep.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{
    ColumnEditKind, ExportKind, IngestFormat, MetricsEvent, MetricsSink, PromoteKind,
    metrics_report, metrics_reset_all, with_metrics_sink,
};
