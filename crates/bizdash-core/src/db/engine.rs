use crate::{
    clock::Clock,
    db::{
        aggregate::{KpiProgram, KpiSpec, KpiSummary},
        query::{
            Query, QueryError, QueryPlan,
            validate::resolve_fields,
        },
        response::{QueryResult, QueryRow},
        window::page_window,
    },
    model::resolve_field_slot,
    obs::sink::{self, MetricsEvent, Span},
    status::{EffectiveStatus, StatusResolver},
    traits::Record,
    value::Value,
};
use std::{collections::BTreeMap, marker::PhantomData};

///
/// RecordCollectionEngine
///
/// Answers list-view queries over one record type. Holds no records and no
/// query state; every call recomputes from the snapshot it is given, so
/// results always reflect the latest data and the current day.
///

pub struct RecordCollectionEngine<R: Record, C> {
    resolver: StatusResolver<C>,
    search_slots: Vec<usize>,
    kpis: KpiProgram<R::Status>,
    debug: bool,
    _marker: PhantomData<fn() -> R>,
}

impl<R, C> RecordCollectionEngine<R, C>
where
    R: Record + Clone,
    C: Clock,
{
    /// Engine searching the model's default fields, with no KPIs.
    #[must_use]
    pub fn new(resolver: StatusResolver<C>) -> Self {
        let search_slots = R::MODEL
            .searchable
            .iter()
            .filter_map(|field| resolve_field_slot(R::MODEL, field))
            .collect();

        Self {
            resolver,
            search_slots,
            kpis: KpiProgram::default(),
            debug: false,
            _marker: PhantomData,
        }
    }

    /// Replace the searched fields. Unknown names are rejected.
    pub fn with_searchable<F: AsRef<str>>(mut self, fields: &[F]) -> Result<Self, QueryError> {
        self.search_slots = resolve_fields(R::MODEL, fields)?;

        Ok(self)
    }

    /// Compile the KPI set computed on every query.
    pub fn with_kpis(mut self, specs: &[KpiSpec<R::Status>]) -> Result<Self, QueryError> {
        self.kpis = KpiProgram::compile(R::MODEL, specs)?;

        Ok(self)
    }

    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn resolver(&self) -> &StatusResolver<C> {
        &self.resolver
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Effective status of one record as of the clock's current day.
    #[must_use]
    pub fn status_of(&self, record: &R) -> EffectiveStatus<R::Status> {
        self.resolver.resolve(record)
    }

    /// KPIs over a whole collection, ignoring search and filters.
    #[must_use]
    pub fn summarize(&self, records: &[R]) -> KpiSummary {
        let today = self.resolver.clock().today();

        self.kpis.evaluate(
            records
                .iter()
                .map(|record| (record, self.resolver.resolve_on(record, today))),
        )
    }

    /// Run one query: resolve status → search → filter → sort →
    /// summarize → paginate.
    ///
    /// Every record is judged against the same "today", read once per call.
    pub fn query(
        &self,
        records: &[R],
        query: &Query<R::Status>,
    ) -> Result<QueryResult<R>, QueryError> {
        let mut span = Span::new(R::MODEL.path);

        let plan = match QueryPlan::compile::<R>(query, &self.search_slots) {
            Ok(plan) => plan,
            Err(err) => {
                sink::record(MetricsEvent::QueryRejected {
                    entity_path: R::MODEL.path,
                });
                self.debug_log(format!("Rejected query on {}: {err}", R::MODEL.path));

                return Err(err);
            }
        };

        let today = self.resolver.clock().today();

        if self.debug {
            self.debug_log(format!(
                "Executing query on {} (today={today}, rows={})",
                R::MODEL.path,
                records.len()
            ));
            self.debug_log(format!(
                "Plan: search={}, filters={}, sort_keys={}, kpis={}, page={}/{}",
                if plan.search.is_match_all() { "no" } else { "yes" },
                plan.filters.len(),
                plan.order.len(),
                self.kpis.len(),
                plan.page.page,
                plan.page.page_size
            ));
        }

        // search, then histogram before the status filter
        let searched: Vec<(&R, EffectiveStatus<R::Status>)> = records
            .iter()
            .filter(|record| plan.search.matches(*record))
            .map(|record| (record, self.resolver.resolve_on(record, today)))
            .collect();

        let mut status_counts = BTreeMap::new();
        for (_, status) in &searched {
            *status_counts.entry(*status).or_insert(0_usize) += 1;
        }

        // filter
        let mut rows: Vec<(&R, EffectiveStatus<R::Status>, Vec<Value>)> = searched
            .into_iter()
            .filter(|(_, status)| plan.admits(status))
            .map(|(record, status)| (record, status, plan.order.sort_keys(record)))
            .collect();

        // sort
        if !plan.order.is_empty() {
            plan.order.sort(&mut rows, |row| row.2.as_slice());
            sink::record(MetricsEvent::SortApplied {
                entity_path: R::MODEL.path,
                keys: u32::try_from(plan.order.len()).unwrap_or(u32::MAX),
            });
        }

        // summarize the filtered set, never the page
        let summary = self
            .kpis
            .evaluate(rows.iter().map(|(record, status, _)| (*record, *status)));

        // paginate
        let total_filtered = rows.len();
        let window = page_window(total_filtered, plan.page);
        if window.clamped {
            sink::record(MetricsEvent::PageClamped {
                entity_path: R::MODEL.path,
                requested: plan.page.page,
                served: window.page_number,
            });
            self.debug_log(format!(
                "Page {} past the end; serving page {} of {}",
                plan.page.page, window.page_number, window.total_pages
            ));
        }

        let page_rows: Vec<QueryRow<R>> = rows
            .iter()
            .skip(window.start)
            .take(window.end - window.start)
            .map(|(record, status, _)| QueryRow {
                record: (*record).clone(),
                status: *status,
            })
            .collect();

        let to_u64 = |n: usize| u64::try_from(n).unwrap_or(u64::MAX);
        span.set_rows(
            to_u64(records.len()),
            to_u64(total_filtered),
            to_u64(page_rows.len()),
        );

        Ok(QueryResult {
            rows: page_rows,
            total_filtered,
            total_pages: window.total_pages,
            page_number: window.page_number,
            summary,
            status_counts,
        })
    }
}
