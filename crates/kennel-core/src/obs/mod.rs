//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! This module does not access storage internals directly.
//! Engine-level storage inspection lives in `db`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use crate::db::{EntityStorageReport, StorageReport};
pub use metrics::{EntityCounters, EventOps, EventReport};
pub use sink::{
    ExecKind, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
