//! KPI aggregation over filtered record sets.
//!
//! Summaries always run over the filtered, pre-pagination set so that
//! "X of Y" counters reconcile with the KPI cards.

mod contracts;
mod execution;
mod summary;


pub use contracts::{KpiPredicate, KpiSpec, Measure, Reducer};
pub use execution::summarize;
pub use summary::{KpiSummary, KpiValue};

pub(crate) use execution::KpiProgram;
