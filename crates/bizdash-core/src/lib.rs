//! Core runtime for bizdash: record models, values, derived status, the
//! record-collection engine, KPI aggregation, formatting, and observability.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod clock;
pub mod db;
pub mod error;
pub mod format;
pub mod model;
pub mod obs;
pub mod snapshot;
pub mod status;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// CONSTANTS
///

/// Page size used when a query does not name one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Forward window, in days, inside which an open record counts as due soon.
pub const DEFAULT_DUE_SOON_DAYS: u32 = 7;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, engines, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{FieldKind, FieldModel, RecordModel},
        status::EffectiveStatus,
        traits::{FieldValues, Record, StatusKind},
        types::{Date, Decimal},
        value::Value,
    };
}
