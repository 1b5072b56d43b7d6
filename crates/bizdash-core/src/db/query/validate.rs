//! Query validation against a record model.
//!
//! Rejections happen at the engine boundary so callers cannot build
//! nonsensical result sets. Empty collections, empty searches and filters
//! that match nothing are valid and never reach this module.

use crate::{
    db::query::{OrderSpec, PageSpec},
    error::ErrorClass,
    model::RecordModel,
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// QueryError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] InvalidQueryError),

    /// Sort key not present on the record model.
    #[error("unknown sort key '{field}' for {entity}")]
    UnknownSortKey { entity: &'static str, field: String },

    /// Sort key names a field that cannot be ordered (lists).
    #[error("sort key '{field}' for {entity} is not orderable")]
    UnorderableSortKey { entity: &'static str, field: String },

    /// Sort key appears more than once in one ordering.
    #[error("sort key '{field}' appears multiple times")]
    DuplicateSortKey { field: String },

    /// Search or KPI references a field not present on the record model.
    #[error("unknown field '{field}' for {entity}")]
    UnknownField { entity: &'static str, field: String },

    /// KPI measure names a field that is not numeric.
    #[error("field '{field}' for {entity} is not numeric")]
    NonNumericField { entity: &'static str, field: String },
}

impl QueryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidQuery(_) => ErrorClass::InvalidQuery,
            Self::UnknownSortKey { .. }
            | Self::DuplicateSortKey { .. }
            | Self::UnknownField { .. } => ErrorClass::InvalidInput,
            Self::UnorderableSortKey { .. } | Self::NonNumericField { .. } => {
                ErrorClass::Unsupported
            }
        }
    }
}

///
/// InvalidQueryError
/// Page window violations.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum InvalidQueryError {
    #[error("page must be at least 1")]
    PageBelowOne,

    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Reject page windows that cannot describe any slice.
pub(crate) const fn validate_page(page: PageSpec) -> Result<(), InvalidQueryError> {
    if page.page < 1 {
        return Err(InvalidQueryError::PageBelowOne);
    }
    if page.page_size == 0 {
        return Err(InvalidQueryError::ZeroPageSize);
    }

    Ok(())
}

/// Validate every sort key and resolve it to a field slot.
pub(crate) fn validate_order(
    model: &RecordModel,
    order: &OrderSpec,
) -> Result<Vec<usize>, QueryError> {
    let mut seen = BTreeSet::new();
    let mut slots = Vec::with_capacity(order.fields.len());

    for (field, _) in &order.fields {
        let Some(slot) = model.fields.iter().position(|f| f.name == field) else {
            return Err(QueryError::UnknownSortKey {
                entity: model.entity_name,
                field: field.clone(),
            });
        };

        if !model.fields[slot].kind.is_orderable() {
            return Err(QueryError::UnorderableSortKey {
                entity: model.entity_name,
                field: field.clone(),
            });
        }

        if !seen.insert(field.as_str()) {
            return Err(QueryError::DuplicateSortKey {
                field: field.clone(),
            });
        }

        slots.push(slot);
    }

    Ok(slots)
}

/// Resolve a list of field names to slots, rejecting unknown names.
pub(crate) fn resolve_fields<S: AsRef<str>>(
    model: &RecordModel,
    fields: &[S],
) -> Result<Vec<usize>, QueryError> {
    fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            model
                .fields
                .iter()
                .position(|f| f.name == field)
                .ok_or_else(|| QueryError::UnknownField {
                    entity: model.entity_name,
                    field: field.to_string(),
                })
        })
        .collect()
}

/// Resolve one numeric field to its slot.
pub(crate) fn resolve_numeric_field(
    model: &RecordModel,
    field: &str,
) -> Result<usize, QueryError> {
    let slot = resolve_fields(model, &[field])?[0];

    if !model.fields[slot].kind.is_numeric() {
        return Err(QueryError::NonNumericField {
            entity: model.entity_name,
            field: field.to_string(),
        });
    }

    Ok(slot)
}
