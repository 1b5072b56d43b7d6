//! Immutable record snapshots.
//!
//! A view session holds one snapshot. Edits never mutate it: every edit
//! returns a new snapshot and the caller re-runs its query against that.

use crate::traits::Record;
use derive_more::Deref;
use std::{collections::BTreeSet, sync::Arc};
use thiserror::Error as ThisError;

///
/// SnapshotError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SnapshotError {
    #[error("duplicate id '{id}' in {entity} snapshot")]
    DuplicateId { entity: &'static str, id: String },

    #[error("no {entity} with id '{id}' in snapshot")]
    NotFound { entity: &'static str, id: String },
}

///
/// Snapshot
/// Shared, read-only record collection with unique ids.
///

#[derive(Debug, Deref)]
pub struct Snapshot<R> {
    records: Arc<[R]>,
}

impl<R> Clone for Snapshot<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }
}

impl<R: Record + Clone> Snapshot<R> {
    /// Build a snapshot, rejecting duplicate ids.
    pub fn new(records: impl Into<Vec<R>>) -> Result<Self, SnapshotError> {
        let records = records.into();
        check_unique_ids(&records)?;

        Ok(Self {
            records: Arc::from(records),
        })
    }

    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// New snapshot with the record sharing `record.id()` replaced.
    pub fn with_replaced(&self, record: R) -> Result<Self, SnapshotError> {
        let id = record.id().to_string();

        self.with_updated(&id, |_| record)
    }

    /// New snapshot with `f` applied to the record `id`, e.g. toggling a
    /// task's completion or recording a payment.
    pub fn with_updated(&self, id: &str, f: impl FnOnce(&R) -> R) -> Result<Self, SnapshotError> {
        let position = self.position(id)?;
        let updated = f(&self.records[position]);

        // A renamed record must not collide with another one.
        if updated.id() != id && self.get(updated.id()).is_some() {
            return Err(SnapshotError::DuplicateId {
                entity: R::MODEL.entity_name,
                id: updated.id().to_string(),
            });
        }

        let mut records = self.records.to_vec();
        records[position] = updated;

        Ok(Self {
            records: Arc::from(records),
        })
    }

    /// New snapshot with `record` appended.
    pub fn with_inserted(&self, record: R) -> Result<Self, SnapshotError> {
        if self.get(record.id()).is_some() {
            return Err(SnapshotError::DuplicateId {
                entity: R::MODEL.entity_name,
                id: record.id().to_string(),
            });
        }

        let mut records = self.records.to_vec();
        records.push(record);

        Ok(Self {
            records: Arc::from(records),
        })
    }

    /// New snapshot without the record `id`.
    pub fn without(&self, id: &str) -> Result<Self, SnapshotError> {
        let position = self.position(id)?;

        let mut records = self.records.to_vec();
        records.remove(position);

        Ok(Self {
            records: Arc::from(records),
        })
    }

    fn position(&self, id: &str) -> Result<usize, SnapshotError> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| SnapshotError::NotFound {
                entity: R::MODEL.entity_name,
                id: id.to_string(),
            })
    }
}

fn check_unique_ids<R: Record>(records: &[R]) -> Result<(), SnapshotError> {
    let mut seen = BTreeSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            return Err(SnapshotError::DuplicateId {
                entity: R::MODEL.entity_name,
                id: record.id().to_string(),
            });
        }
    }

    Ok(())
}
