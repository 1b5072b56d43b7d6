use bizdash_config::{DashboardConfig, ViewId};
use std::collections::{BTreeMap, BTreeSet};

///
/// CapabilityTable
///
/// Role → reachable views. Consulted once when the navigation menu is
/// built. It routes menus; it does not authorize anything.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CapabilityTable {
    roles: BTreeMap<String, BTreeSet<ViewId>>,
}

impl CapabilityTable {
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            roles: config
                .roles
                .iter()
                .map(|(role, cfg)| (role.clone(), cfg.views.clone()))
                .collect(),
        }
    }

    /// Grant `views` to `role`, adding to any views it already has.
    #[must_use]
    pub fn grant(mut self, role: impl Into<String>, views: impl IntoIterator<Item = ViewId>) -> Self {
        self.roles.entry(role.into()).or_default().extend(views);
        self
    }

    /// Unknown roles reach nothing.
    #[must_use]
    pub fn allows(&self, role: &str, view: ViewId) -> bool {
        self.roles
            .get(role)
            .is_some_and(|views| views.contains(&view))
    }

    /// Views reachable by `role`, in menu order.
    #[must_use]
    pub fn views_for(&self, role: &str) -> Vec<ViewId> {
        let Some(views) = self.roles.get(role) else {
            return Vec::new();
        };

        ViewId::ALL
            .into_iter()
            .filter(|view| views.contains(view))
            .collect()
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }
}
