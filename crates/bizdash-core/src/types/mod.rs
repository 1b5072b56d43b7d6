mod date;

pub use date::{Date, DateParseError};

/// Monetary and fractional numeric values.
pub use rust_decimal::Decimal;
