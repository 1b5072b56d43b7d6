//! Query intent: search text, status filters, ordering, and page window.
//!
//! A caller owns one `Query` per view and hands it to the engine on every
//! render. The engine never keeps it.

mod plan;
pub(crate) mod validate;


use crate::{DEFAULT_PAGE_SIZE, status::EffectiveStatus, traits::StatusKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// re-exports
pub(crate) use plan::QueryPlan;
pub use validate::{InvalidQueryError, QueryError};

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

///
/// OrderSpec
///
/// Ordered sort keys. The first entry is the primary sort key; later
/// entries break ties left to right.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub fields: Vec<(String, OrderDirection)>,
}

impl OrderSpec {
    #[must_use]
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            fields: vec![(field.into(), direction)],
        }
    }

    #[must_use]
    pub fn then(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.fields.push((field.into(), direction));
        self
    }

    /// Primary sort key and direction, if any.
    #[must_use]
    pub fn primary(&self) -> Option<(&str, OrderDirection)> {
        self.fields
            .first()
            .map(|(field, direction)| (field.as_str(), *direction))
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

///
/// PageSpec
/// One-based page number plus page size.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageSpec {
    pub page: u32,
    pub page_size: u32,
}

impl PageSpec {
    #[must_use]
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

///
/// Query
///
/// Empty `active_filters` means "no status filtering", never "exclude all".
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Query<S> {
    search_text: String,
    active_filters: BTreeSet<EffectiveStatus<S>>,
    order: OrderSpec,
    page: PageSpec,
}

impl<S: StatusKind> Default for Query<S> {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_filters: BTreeSet::new(),
            order: OrderSpec::default(),
            page: PageSpec::default(),
        }
    }
}

impl<S: StatusKind> Query<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    //
    // Builders
    //

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub fn filter(mut self, status: impl Into<EffectiveStatus<S>>) -> Self {
        self.active_filters.insert(status.into());
        self
    }

    #[must_use]
    pub fn filters<I>(mut self, statuses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<EffectiveStatus<S>>,
    {
        self.active_filters
            .extend(statuses.into_iter().map(Into::into));
        self
    }

    /// Replace the ordering with a single primary sort key.
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.order = OrderSpec::new(field, direction);
        self
    }

    /// Append a tie-breaking sort key.
    #[must_use]
    pub fn then_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.order.fields.push((field.into(), direction));
        self
    }

    #[must_use]
    pub fn order(mut self, order: OrderSpec) -> Self {
        self.order = order;
        self
    }

    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page.page = page;
        self
    }

    #[must_use]
    pub const fn page_size(mut self, page_size: u32) -> Self {
        self.page.page_size = page_size;
        self
    }

    //
    // In-place edits (UI event handlers)
    //

    /// Set the search text and return to the first page.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page.page = 1;
    }

    /// Add or remove one status filter and return to the first page.
    pub fn toggle_filter(&mut self, status: impl Into<EffectiveStatus<S>>) {
        let status = status.into();
        if !self.active_filters.remove(&status) {
            self.active_filters.insert(status);
        }
        self.page.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.active_filters.clear();
        self.page.page = 1;
    }

    /// Header-click sorting: a new field sorts ascending, the current
    /// primary field flips direction.
    pub fn toggle_sort(&mut self, field: &str) {
        let direction = match self.order.primary() {
            Some((current, direction)) if current == field => direction.toggled(),
            _ => OrderDirection::Asc,
        };
        self.order = OrderSpec::new(field, direction);
        self.page.page = 1;
    }

    pub const fn set_page(&mut self, page: u32) {
        self.page.page = page;
    }

    //
    // Accessors
    //

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub const fn active_filters(&self) -> &BTreeSet<EffectiveStatus<S>> {
        &self.active_filters
    }

    #[must_use]
    pub const fn order_spec(&self) -> &OrderSpec {
        &self.order
    }

    #[must_use]
    pub const fn page_spec(&self) -> PageSpec {
        self.page
    }
}
