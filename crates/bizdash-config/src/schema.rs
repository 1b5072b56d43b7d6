use crate::ConfigError;
use bizdash_core::{DEFAULT_DUE_SOON_DAYS, DEFAULT_PAGE_SIZE, format::Locale};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

///
/// ViewId
/// Navigable screens of the dashboard.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewId {
    Dashboard,
    Customers,
    Opportunities,
    Invoices,
    Projects,
    Materials,
    Suppliers,
    Tasks,
    PurchaseOrders,
    Reports,
    Settings,
}

impl ViewId {
    pub const ALL: [Self; 11] = [
        Self::Dashboard,
        Self::Customers,
        Self::Opportunities,
        Self::Invoices,
        Self::Projects,
        Self::Materials,
        Self::Suppliers,
        Self::Tasks,
        Self::PurchaseOrders,
        Self::Reports,
        Self::Settings,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Customers => "customers",
            Self::Opportunities => "opportunities",
            Self::Invoices => "invoices",
            Self::Projects => "projects",
            Self::Materials => "materials",
            Self::Suppliers => "suppliers",
            Self::Tasks => "tasks",
            Self::PurchaseOrders => "purchase_orders",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// ViewConfig
/// Per-view overrides; unset keys fall back to the global values.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

///
/// RoleConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoleConfig {
    pub views: BTreeSet<ViewId>,
}

impl RoleConfig {
    #[must_use]
    pub fn new(views: impl IntoIterator<Item = ViewId>) -> Self {
        Self {
            views: views.into_iter().collect(),
        }
    }
}

///
/// DashboardConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub locale: Locale,
    pub due_soon_days: u32,
    pub page_size: u32,
    pub views: BTreeMap<ViewId, ViewConfig>,
    pub roles: BTreeMap<String, RoleConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            views: BTreeMap::new(),
            roles: default_roles(),
        }
    }
}

impl DashboardConfig {
    /// Page size for `view`, honoring its override.
    #[must_use]
    pub fn page_size_for(&self, view: ViewId) -> u32 {
        self.views
            .get(&view)
            .and_then(|v| v.page_size)
            .unwrap_or(self.page_size)
    }

    /// Searchable-field override for `view`, if one is configured.
    #[must_use]
    pub fn searchable_for(&self, view: ViewId) -> Option<&[String]> {
        self.views
            .get(&view)
            .and_then(|v| v.searchable.as_deref())
    }

    /// Check ranges and cross-references that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "must be greater than zero"));
        }

        for (view, cfg) in &self.views {
            if cfg.page_size == Some(0) {
                return Err(ConfigError::invalid(
                    format!("views.{view}.page_size"),
                    "must be greater than zero",
                ));
            }
            if cfg.searchable.as_ref().is_some_and(Vec::is_empty) {
                return Err(ConfigError::invalid(
                    format!("views.{view}.searchable"),
                    "must name at least one field",
                ));
            }
        }

        for (role, cfg) in &self.roles {
            if role.trim().is_empty() {
                return Err(ConfigError::invalid("roles", "role names must not be blank"));
            }
            if cfg.views.is_empty() {
                return Err(ConfigError::invalid(
                    format!("roles.{role}.views"),
                    "must grant at least one view",
                ));
            }
        }

        Ok(())
    }
}

// Built-in role table. Menu routing only; not an authorization boundary.
fn default_roles() -> BTreeMap<String, RoleConfig> {
    [
        ("admin", RoleConfig::new(ViewId::ALL)),
        (
            "finance",
            RoleConfig::new([
                ViewId::Dashboard,
                ViewId::Customers,
                ViewId::Invoices,
                ViewId::Suppliers,
                ViewId::Reports,
            ]),
        ),
        (
            "sales",
            RoleConfig::new([
                ViewId::Dashboard,
                ViewId::Customers,
                ViewId::Opportunities,
                ViewId::Projects,
                ViewId::Tasks,
            ]),
        ),
        (
            "operations",
            RoleConfig::new([
                ViewId::Dashboard,
                ViewId::Projects,
                ViewId::Materials,
                ViewId::Tasks,
                ViewId::PurchaseOrders,
            ]),
        ),
        (
            "purchasing",
            RoleConfig::new([
                ViewId::Dashboard,
                ViewId::Materials,
                ViewId::Suppliers,
                ViewId::PurchaseOrders,
                ViewId::Reports,
            ]),
        ),
    ]
    .into_iter()
    .map(|(role, cfg)| (role.to_string(), cfg))
    .collect()
}
