//! Host sampling and alerting.
//!
//! This module provides the sampling loop that reads host metrics through a
//! [`MetricsProvider`], evaluates them against [`Thresholds`] and reports the
//! result through a [`ReportSink`].

pub mod alerts;
mod collector;
mod metrics;
mod provider;
pub mod reporting;
mod runtime;

pub use alerts::{evaluate_alerts, AlertEvent, AlertMetric, AlertSeverity, Thresholds};
pub use collector::{MetricsCollector, Sample, Unavailable};
pub use metrics::{
    DiskPartition, DiskSpace, DiskUsage, LoadAverage, MemoryUsage, MetricsSnapshot, OsIdentity,
};
pub use provider::{MetricsProvider, SysinfoProvider};
pub use reporting::{
    format_log_line, FileSink, MemorySink, MultiSink, ReportLevel, ReportSink, SinkEvent,
};
pub use runtime::{describe_alerts, describe_metrics, CycleOutcome, LoopState, SamplingLoop};
