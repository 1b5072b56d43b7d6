mod collate;
mod compare;


use crate::types::{Date, Decimal};
use serde::Serialize;
use std::fmt;

// re-exports
pub use collate::collate;
pub use compare::canonical_cmp;

///
/// Value
///
/// Field value as seen by search, ordering, and aggregation.
///
/// Null → the field is present on the model but holds no value
///        (an optional date that was never set, for example).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(Date),
    Decimal(Decimal),
    /// Stored enumeration label (status, priority, category).
    Enum(&'static str),
    Int(i64),
    /// Ordered list of values, e.g. free-form tags.
    List(Vec<Self>),
    Null,
    Text(String),
}

impl Value {
    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Decimal(_) | Self::Int(_))
    }

    ///
    /// CONVERSION
    ///

    /// Numeric view of the value, widening integers to decimals.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Int(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Enum(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Case-insensitive substring test used by free-text search.
    ///
    /// `needle` must already be lowercased. Lists match when any element
    /// matches; null never matches.
    #[must_use]
    pub fn contains_folded(&self, needle: &str) -> bool {
        match self {
            Self::Null => false,
            Self::Text(s) => s.to_lowercase().contains(needle),
            Self::Enum(s) => s.to_lowercase().contains(needle),
            Self::List(items) => items.iter().any(|item| item.contains_folded(needle)),
            Self::Bool(_) | Self::Date(_) | Self::Decimal(_) | Self::Int(_) => {
                self.to_string().to_lowercase().contains(needle)
            }
        }
    }

    /// Canonical variant rank used when comparing mixed variants.
    /// Int and Decimal share a rank so they compare numerically.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Decimal(_) | Self::Int(_) => 2,
            Self::Date(_) => 3,
            Self::Enum(_) => 4,
            Self::Text(_) => 5,
            Self::List(_) => 6,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Enum(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
        }
    }
}

///
/// From
///

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}
