//! Observability: composer counters and the sink they flow through.
//!
//! Composer code records `MetricsEvent`s through `sink::record` only; it
//! never touches `metrics` state directly.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

pub use metrics::{ComposeCounters, MetricsReport};
pub use sink::{
    ComposeKind, MetricsEvent, MetricsSink, ScopeKind, metrics_report, metrics_reset,
    with_metrics_sink,
};
