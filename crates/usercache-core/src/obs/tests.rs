use super::*;
use std::{cell::RefCell, rc::Rc};

#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn global_sink_accumulates_counters() {
    metrics_reset();

    sink::record(MetricsEvent::Composed {
        kind: ComposeKind::Relationship,
        scope: ScopeKind::Local,
        args: 2,
        limited: false,
    });
    sink::record(MetricsEvent::Composed {
        kind: ComposeKind::Score,
        scope: ScopeKind::Federated,
        args: 3,
        limited: true,
    });

    let counters = metrics_report().counters;
    assert_eq!(counters.relationship_calls, 1);
    assert_eq!(counters.score_calls, 1);
    assert_eq!(counters.local_scope, 1);
    assert_eq!(counters.federated_scope, 1);
    assert_eq!(counters.args_bound, 5);
    assert_eq!(counters.limited, 1);

    metrics_reset();
    assert_eq!(metrics_report(), MetricsReport::default());
}

#[test]
fn override_sink_captures_and_restores() {
    metrics_reset();
    let capture = Rc::new(CapturingSink::default());

    with_metrics_sink(capture.clone(), || {
        sink::record(MetricsEvent::ArgumentMismatch {
            kind: ComposeKind::Relationship,
            placeholders: 1,
            args: 0,
        });
    });

    assert_eq!(capture.events.borrow().len(), 1);
    assert_eq!(metrics_report().counters.argument_mismatches, 0);

    sink::record(MetricsEvent::ArgumentMismatch {
        kind: ComposeKind::Relationship,
        placeholders: 1,
        args: 0,
    });
    assert_eq!(capture.events.borrow().len(), 1);
    assert_eq!(metrics_report().counters.argument_mismatches, 1);
}
