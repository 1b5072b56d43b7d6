use crate::{
    db::{
        order::OrderProgram,
        query::{
            PageSpec, Query, QueryError,
            validate::{validate_order, validate_page},
        },
        search::SearchProgram,
    },
    status::EffectiveStatus,
    traits::Record,
};
use std::collections::BTreeSet;

///
/// QueryPlan
///
/// Validated, slot-resolved form of one `Query` against one record model.
/// Built once per engine call; the pipeline reads only this.
///

pub(crate) struct QueryPlan<'a, S> {
    pub(crate) search: SearchProgram<'a>,
    pub(crate) filters: &'a BTreeSet<EffectiveStatus<S>>,
    pub(crate) order: OrderProgram,
    pub(crate) page: PageSpec,
}

impl<'a, S: Ord> QueryPlan<'a, S> {
    /// Validate `query` and resolve its field names to slots.
    ///
    /// Page bounds are checked first, then the ordering.
    pub(crate) fn compile<R>(query: &'a Query<S>, search_slots: &'a [usize]) -> Result<Self, QueryError>
    where
        R: Record<Status = S>,
    {
        validate_page(query.page)?;

        let slots = validate_order(R::MODEL, &query.order)?;
        let keys = slots
            .into_iter()
            .zip(query.order.fields.iter().map(|(_, direction)| *direction))
            .collect();

        Ok(Self {
            search: SearchProgram::compile(&query.search_text, search_slots),
            filters: &query.active_filters,
            order: OrderProgram::new(keys),
            page: query.page,
        })
    }

    /// Status filter; an empty filter set admits every status.
    #[must_use]
    pub(crate) fn admits(&self, status: &EffectiveStatus<S>) -> bool {
        self.filters.is_empty() || self.filters.contains(status)
    }
}
