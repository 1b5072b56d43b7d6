use crate::{capability::CapabilityTable, entity::DashboardEntity, error::Error};
use bizdash_config::{DashboardConfig, ViewId};
use bizdash_core::{
    clock::{Clock, SystemClock},
    db::{QueryResult, RecordCollectionEngine, query::Query},
    format::Formatter,
    status::{StatusPolicy, StatusResolver},
};
use std::sync::Arc;

///
/// Dashboard
///
/// Binds one validated configuration to a clock. Hands out engines, seeded
/// queries, the locale formatter and the capability table; holds no
/// records and no per-view state.
///

#[derive(Clone, Debug)]
pub struct Dashboard<C = SystemClock> {
    config: DashboardConfig,
    clock: Arc<C>,
    formatter: Formatter,
    capabilities: CapabilityTable,
    debug: bool,
}

impl Dashboard<SystemClock> {
    /// Dashboard on the wall clock.
    pub fn from_config(config: DashboardConfig) -> Result<Self, Error> {
        Self::new(config, SystemClock::default())
    }
}

impl<C: Clock> Dashboard<C> {
    pub fn new(config: DashboardConfig, clock: C) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            formatter: Formatter::new(config.locale),
            capabilities: CapabilityTable::from_config(&config),
            clock: Arc::new(clock),
            config,
            debug: false,
        })
    }

    /// Engines handed out from now on print `[debug]` lines.
    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub const fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    #[must_use]
    pub const fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Navigation menu for `role`.
    #[must_use]
    pub fn menu(&self, role: &str) -> Vec<ViewId> {
        self.capabilities.views_for(role)
    }

    /// Status resolver sharing this dashboard's clock and due-soon window.
    #[must_use]
    pub fn resolver(&self) -> StatusResolver<Arc<C>> {
        StatusResolver::with_policy(
            Arc::clone(&self.clock),
            StatusPolicy::new(self.config.due_soon_days),
        )
    }

    /// Engine for `E`'s list view: default KPIs, plus the configured
    /// searchable override when one exists.
    pub fn engine_for<E: DashboardEntity>(&self) -> Result<RecordCollectionEngine<E, Arc<C>>, Error> {
        let mut engine = RecordCollectionEngine::new(self.resolver()).with_kpis(&E::default_kpis())?;

        if let Some(fields) = self.config.searchable_for(E::VIEW) {
            engine = engine.with_searchable(fields)?;
        }
        if self.debug {
            engine = engine.debug();
        }

        Ok(engine)
    }

    /// First-page query for `E`'s view at the configured page size.
    #[must_use]
    pub fn query_for<E: DashboardEntity>(&self) -> Query<E::Status> {
        Query::new().page_size(self.config.page_size_for(E::VIEW))
    }

    /// One-shot list query. Builds a fresh engine per call; hold on to
    /// `engine_for` when querying the same view repeatedly.
    pub fn list<E: DashboardEntity>(
        &self,
        records: &[E],
        query: &Query<E::Status>,
    ) -> Result<QueryResult<E>, Error> {
        let result = self.engine_for::<E>()?.query(records, query)?;

        Ok(result)
    }
}
