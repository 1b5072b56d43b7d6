use crate::{
    db::aggregate::KpiSummary,
    status::EffectiveStatus,
    traits::Record,
};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// QueryRow
/// One record on the served page, paired with its effective status.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(bound(serialize = "R: Serialize, R::Status: Serialize"))]
pub struct QueryRow<R: Record> {
    pub record: R,
    pub status: EffectiveStatus<R::Status>,
}

///
/// QueryResult
///
/// Output of one engine call. `summary` describes the whole filtered set,
/// never just the served page.
///

#[derive(Clone, Debug)]
pub struct QueryResult<R: Record> {
    pub(crate) rows: Vec<QueryRow<R>>,
    pub(crate) total_filtered: usize,
    pub(crate) total_pages: u32,
    pub(crate) page_number: u32,
    pub(crate) summary: KpiSummary,
    pub(crate) status_counts: BTreeMap<EffectiveStatus<R::Status>, usize>,
}

impl<R: Record> QueryResult<R> {
    /// Rows on the served page, in sort order.
    #[must_use]
    pub fn page(&self) -> &[QueryRow<R>] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.rows.iter().map(|row| &row.record)
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.records().map(Record::id).collect()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<QueryRow<R>> {
        self.rows
    }

    /// Rows matching search and filters, before pagination.
    #[must_use]
    pub const fn total_filtered(&self) -> usize {
        self.total_filtered
    }

    /// Page count; never below 1.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Page actually served. Differs from the requested page when the
    /// request was past the end and got clamped.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub const fn summary(&self) -> &KpiSummary {
        &self.summary
    }

    /// Effective-status histogram of the searched set, before the status
    /// filter. Drives the filter chip badges.
    #[must_use]
    pub const fn status_counts(&self) -> &BTreeMap<EffectiveStatus<R::Status>, usize> {
        &self.status_counts
    }

    #[must_use]
    pub fn status_count(&self, status: impl Into<EffectiveStatus<R::Status>>) -> usize {
        self.status_counts.get(&status.into()).copied().unwrap_or(0)
    }
}
