use crate::types::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, btree_map};

///
/// KpiValue
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KpiValue {
    Count(u64),
    Amount(Decimal),
}

impl KpiValue {
    /// Numeric view; counts widen to decimals.
    #[must_use]
    pub fn as_decimal(self) -> Decimal {
        match self {
            Self::Count(count) => Decimal::from(count),
            Self::Amount(amount) => amount,
        }
    }

    #[must_use]
    pub const fn as_count(self) -> Option<u64> {
        match self {
            Self::Count(count) => Some(count),
            Self::Amount(_) => None,
        }
    }
}

///
/// KpiSummary
///
/// KPI name → value, in key order. Recomputed on every query; never
/// cached across filters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct KpiSummary(BTreeMap<String, KpiValue>);

impl KpiSummary {
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: KpiValue) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<KpiValue> {
        self.0.get(key).copied()
    }

    /// Numeric value of `key`, zero when absent.
    #[must_use]
    pub fn amount(&self, key: &str) -> Decimal {
        self.get(key).map_or(Decimal::ZERO, KpiValue::as_decimal)
    }

    /// Count value of `key`, zero when absent or not a count.
    #[must_use]
    pub fn count(&self, key: &str) -> u64 {
        self.get(key).and_then(KpiValue::as_count).unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, KpiValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a KpiSummary {
    type Item = (&'a String, &'a KpiValue);
    type IntoIter = btree_map::Iter<'a, String, KpiValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
