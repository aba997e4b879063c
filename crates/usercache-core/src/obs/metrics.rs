use serde::{Deserialize, Serialize};
use std::cell::RefCell;

///
/// ComposeCounters
/// In-memory counters for composer entry points.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComposeCounters {
    pub relationship_calls: u64,
    pub score_calls: u64,

    // Account scope of composed queries
    pub local_scope: u64,
    pub federated_scope: u64,

    pub args_bound: u64,
    pub limited: u64,
    pub argument_mismatches: u64,
}

///
/// MetricsReport
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MetricsReport {
    pub counters: ComposeCounters,
}

thread_local! {
    static COUNTERS: RefCell<ComposeCounters> = RefCell::new(ComposeCounters::default());
}

/// Borrow counters mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut ComposeCounters) -> R) -> R {
    COUNTERS.with(|m| f(&mut m.borrow_mut()))
}

pub(crate) fn report() -> MetricsReport {
    COUNTERS.with(|m| MetricsReport {
        counters: m.borrow().clone(),
    })
}

pub(crate) fn reset() {
    with_state_mut(|m| *m = ComposeCounters::default());
}
