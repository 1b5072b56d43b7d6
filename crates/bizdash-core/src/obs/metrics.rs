use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};
use time::OffsetDateTime;

///
/// EventState
/// Ephemeral, in-memory counters for engine operations.
///

#[derive(Clone, Debug)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) entities: BTreeMap<String, EntityCounters>,
    pub(crate) since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            entities: BTreeMap::default(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Engine entrypoints
    pub query_calls: u64,
    pub query_errors: u64,
    pub summaries: u64,

    // Rows touched
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub rows_returned: u64,

    // Pipeline decisions
    pub sorts_applied: u64,
    pub pages_clamped: u64,

    // Formatter
    pub format_rejections: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub query_calls: u64,
    pub query_errors: u64,
    pub rows_scanned: u64,
    pub rows_matched: u64,
    pub rows_returned: u64,
    pub pages_clamped: u64,
}

///
/// EventReport
/// Point-in-time copy of the counters.
///

#[derive(Clone, Debug, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
    pub since_ms: u64,
}

thread_local! {
    static COUNTERS: RefCell<EventState> = RefCell::new(EventState::default());
}

pub(crate) fn update<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    COUNTERS.with(|cell| f(&mut cell.borrow_mut()))
}

/// Zero every counter and restart the window.
pub(crate) fn reset_all() {
    update(|state| *state = EventState::default());
}

/// Copy the current counters into a report.
pub(crate) fn report() -> EventReport {
    COUNTERS.with(|cell| {
        let state = cell.borrow();

        EventReport {
            ops: state.ops.clone(),
            entities: state.entities.clone(),
            since_ms: state.since_ms,
        }
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_millis() -> u64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();

    (nanos / 1_000_000).max(0) as u64
}
