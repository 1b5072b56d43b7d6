//! Record-collection engine.
//!
//! Pipeline per query, in order:
//! resolve status → search → filter → sort → summarize → paginate.

pub mod aggregate;
pub mod query;
pub mod response;

mod engine;
mod order;
mod search;
mod window;

#[cfg(test)]
mod tests;

pub use engine::RecordCollectionEngine;
pub use response::{QueryResult, QueryRow};
