//! Metrics sink boundary.
//!
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.
//! This module is the only bridge between composer logic and the
//! thread-local counters.
use crate::obs::metrics::{self, MetricsReport};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// ComposeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ComposeKind {
    Relationship,
    Score,
}

///
/// ScopeKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScopeKind {
    Local,
    Federated,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    Composed {
        kind: ComposeKind,
        scope: ScopeKind,
        args: u64,
        limited: bool,
    },
    ArgumentMismatch {
        kind: ComposeKind,
        placeholders: u64,
        args: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink writing into the thread-local counters.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::Composed {
                kind,
                scope,
                args,
                limited,
            } => metrics::with_state_mut(|m| {
                match kind {
                    ComposeKind::Relationship => {
                        m.relationship_calls = m.relationship_calls.saturating_add(1);
                    }
                    ComposeKind::Score => m.score_calls = m.score_calls.saturating_add(1),
                }
                match scope {
                    ScopeKind::Local => m.local_scope = m.local_scope.saturating_add(1),
                    ScopeKind::Federated => {
                        m.federated_scope = m.federated_scope.saturating_add(1);
                    }
                }
                m.args_bound = m.args_bound.saturating_add(args);
                if limited {
                    m.limited = m.limited.saturating_add(1);
                }
            }),
            MetricsEvent::ArgumentMismatch { .. } => metrics::with_state_mut(|m| {
                m.argument_mismatches = m.argument_mismatches.saturating_add(1);
            }),
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's counters.
#[must_use]
pub fn metrics_report() -> MetricsReport {
    metrics::report()
}

/// Reset the current thread's counters.
pub fn metrics_reset() {
    metrics::reset();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
