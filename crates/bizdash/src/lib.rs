//! ## Crate layout
//! - `core`: record models, values, derived status, the record-collection
//!   engine, KPI aggregation, formatting, and observability.
//! - `config`: TOML dashboard configuration.
//! - `entity`: the concrete records each list view shows.
//! - `capability`: role → view routing for the navigation menu.
//! - `dashboard`: binds config, clock and formatter, and hands out engines.
//! - `error`: public error with a stable kind/origin taxonomy.
//!
//! The `prelude` module carries what a list view needs to build and run a
//! query.

pub use bizdash_config as config;
pub use bizdash_core as core;

pub mod capability;
pub mod dashboard;
pub mod entity;
pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use dashboard::Dashboard;
pub use error::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Dashboard,
        capability::CapabilityTable,
        config::{DashboardConfig, ViewId},
        core::{
            clock::{Clock as _, FixedClock, SystemClock},
            db::{
                QueryResult, QueryRow, RecordCollectionEngine,
                aggregate::{KpiPredicate, KpiSpec, KpiSummary, KpiValue, Measure},
                query::{OrderDirection, OrderSpec, Query},
            },
            format::{Formatter, Locale},
            prelude::*,
            snapshot::Snapshot,
        },
        entity::*,
    };
}
