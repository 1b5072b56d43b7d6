use crate::{db::query::QueryError, format::FormatError, snapshot::SnapshotError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Aggregate core error. Each variant keeps its layer-specific payload;
/// `origin` and `class` give the stable classification used by callers
/// that only want to branch on the broad category.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl Error {
    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Format(_) => ErrorOrigin::Format,
            Self::Query(QueryError::NonNumericField { .. }) => ErrorOrigin::Aggregate,
            Self::Query(_) => ErrorOrigin::Query,
            Self::Snapshot(_) => ErrorOrigin::Snapshot,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Format(_) => ErrorClass::InvalidInput,
            Self::Query(err) => err.class(),
            Self::Snapshot(SnapshotError::NotFound { .. }) => ErrorClass::NotFound,
            Self::Snapshot(SnapshotError::DuplicateId { .. }) => ErrorClass::Conflict,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {self}", self.origin(), self.class())
    }
}

///
/// ErrorClass
/// Broad failure category, independent of the layer that raised it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    InvalidInput,
    InvalidQuery,
    NotFound,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::InvalidInput => "invalid_input",
            Self::InvalidQuery => "invalid_query",
            Self::NotFound => "not_found",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Aggregate,
    Format,
    Query,
    Snapshot,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Aggregate => "aggregate",
            Self::Format => "format",
            Self::Query => "query",
            Self::Snapshot => "snapshot",
        };
        write!(f, "{label}")
    }
}
