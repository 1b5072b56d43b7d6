use bizdash_config::ConfigError;
use bizdash_core::{
    db::query::QueryError,
    error::{Error as CoreError, ErrorOrigin as CoreErrorOrigin},
    format::FormatError,
    snapshot::SnapshotError,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Format(err) => err.into(),
            CoreError::Query(err) => err.into(),
            CoreError::Snapshot(err) => err.into(),
        }
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        let kind = match &err {
            QueryError::InvalidQuery(_) => QueryErrorKind::InvalidPage,
            QueryError::UnknownSortKey { .. }
            | QueryError::UnorderableSortKey { .. }
            | QueryError::DuplicateSortKey { .. } => QueryErrorKind::InvalidSort,
            QueryError::UnknownField { .. } | QueryError::NonNumericField { .. } => {
                QueryErrorKind::InvalidField
            }
        };
        let origin = match &err {
            QueryError::NonNumericField { .. } => ErrorOrigin::Aggregate,
            _ => ErrorOrigin::Query,
        };

        Self::new(ErrorKind::Query(kind), origin, err.to_string())
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Self::new(ErrorKind::InvalidInput, ErrorOrigin::Format, err.to_string())
    }
}

impl From<SnapshotError> for Error {
    fn from(err: SnapshotError) -> Self {
        let kind = match err {
            SnapshotError::DuplicateId { .. } => ErrorKind::Conflict,
            SnapshotError::NotFound { .. } => ErrorKind::NotFound,
        };

        Self::new(kind, ErrorOrigin::Snapshot, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers and presentation layers.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Query(QueryErrorKind),

    /// Value cannot be rendered (non-finite amounts, unknown locales).
    InvalidInput,

    /// Record id missing from the snapshot.
    NotFound,

    /// Record id already present in the snapshot.
    Conflict,

    /// Configuration could not be read, parsed, or validated.
    Config,
}

///
/// QueryErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Page number below one or zero page size.
    InvalidPage,

    /// Sort key unknown, unorderable, or repeated.
    InvalidSort,

    /// Search or KPI field unknown or of the wrong kind.
    InvalidField,
}

///
/// ErrorOrigin
/// Public origin taxonomy.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Aggregate,
    Config,
    Format,
    Query,
    Snapshot,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Aggregate => Self::Aggregate,
            CoreErrorOrigin::Format => Self::Format,
            CoreErrorOrigin::Query => Self::Query,
            CoreErrorOrigin::Snapshot => Self::Snapshot,
        }
    }
}
