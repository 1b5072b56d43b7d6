//! Where engine and formatter events land.
//!
//! Callers emit `MetricsEvent`s through `record`; only the global sink
//! below touches the counters in `obs::metrics`.

use crate::obs::metrics::{self, EntityCounters, EventReport, EventState};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    QueryStart {
        entity_path: &'static str,
    },
    QueryFinish {
        entity_path: &'static str,
        rows_scanned: u64,
        rows_matched: u64,
        rows_returned: u64,
    },
    QueryRejected {
        entity_path: &'static str,
    },
    SortApplied {
        entity_path: &'static str,
        keys: u32,
    },
    PageClamped {
        entity_path: &'static str,
        requested: u32,
        served: u32,
    },
    Summarized {
        entity_path: &'static str,
        kpis: u32,
    },
    FormatRejected,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

///
/// GlobalMetricsSink
/// Writes into the thread-local counters. Used whenever no scoped
/// override is installed.
///

pub(crate) struct GlobalMetricsSink;

fn bump(counter: &mut u64, by: u64) {
    *counter = counter.saturating_add(by);
}

fn entity<'a>(state: &'a mut EventState, entity_path: &str) -> &'a mut EntityCounters {
    state.entities.entry(entity_path.to_string()).or_default()
}

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::update(|m| match event {
            MetricsEvent::QueryStart { entity_path } => {
                bump(&mut m.ops.query_calls, 1);
                bump(&mut entity(m, entity_path).query_calls, 1);
            }

            MetricsEvent::QueryFinish {
                entity_path,
                rows_scanned,
                rows_matched,
                rows_returned,
            } => {
                bump(&mut m.ops.rows_scanned, rows_scanned);
                bump(&mut m.ops.rows_matched, rows_matched);
                bump(&mut m.ops.rows_returned, rows_returned);

                let counters = entity(m, entity_path);
                bump(&mut counters.rows_scanned, rows_scanned);
                bump(&mut counters.rows_matched, rows_matched);
                bump(&mut counters.rows_returned, rows_returned);
            }

            MetricsEvent::QueryRejected { entity_path } => {
                bump(&mut m.ops.query_errors, 1);
                bump(&mut entity(m, entity_path).query_errors, 1);
            }

            MetricsEvent::SortApplied { .. } => bump(&mut m.ops.sorts_applied, 1),

            MetricsEvent::PageClamped { entity_path, .. } => {
                bump(&mut m.ops.pages_clamped, 1);
                bump(&mut entity(m, entity_path).pages_clamped, 1);
            }

            MetricsEvent::Summarized { .. } => bump(&mut m.ops.summaries, 1),

            MetricsEvent::FormatRejected => bump(&mut m.ops.format_rejections, 1),
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state for reporting and tests.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored on every exit, including unwind.
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

///
/// Span
/// Start event on creation, finish event on drop, so rejected and
/// successful queries are both accounted for.
///

pub(crate) struct Span {
    entity_path: &'static str,
    rows_scanned: u64,
    rows_matched: u64,
    rows_returned: u64,
}

impl Span {
    /// Start a metrics span for one record type.
    #[must_use]
    pub(crate) fn new(entity_path: &'static str) -> Self {
        record(MetricsEvent::QueryStart { entity_path });

        Self {
            entity_path,
            rows_scanned: 0,
            rows_matched: 0,
            rows_returned: 0,
        }
    }

    pub(crate) const fn set_rows(&mut self, scanned: u64, matched: u64, returned: u64) {
        self.rows_scanned = scanned;
        self.rows_matched = matched;
        self.rows_returned = returned;
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        record(MetricsEvent::QueryFinish {
            entity_path: self.entity_path,
            rows_scanned: self.rows_scanned,
            rows_matched: self.rows_matched,
            rows_returned: self.rows_returned,
        });
    }
}
