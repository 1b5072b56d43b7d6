use crate::{status::EffectiveStatus, value::Value};
use std::collections::BTreeSet;

///
/// Measure
/// Numeric quantity read from one record.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Measure {
    /// One numeric field.
    Field(String),
    /// `minuend - subtrahend`, e.g. `amount - paid_amount`.
    Difference { minuend: String, subtrahend: String },
}

impl Measure {
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    #[must_use]
    pub fn difference(minuend: impl Into<String>, subtrahend: impl Into<String>) -> Self {
        Self::Difference {
            minuend: minuend.into(),
            subtrahend: subtrahend.into(),
        }
    }
}

///
/// KpiPredicate
///
/// Row selector for one reducer. Status predicates test the effective
/// status, never the stored one.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum KpiPredicate<S> {
    StatusIn(BTreeSet<EffectiveStatus<S>>),
    StatusNotIn(BTreeSet<EffectiveStatus<S>>),
    FieldEq { field: String, value: Value },
    And(Vec<Self>),
}

impl<S: Ord> KpiPredicate<S> {
    #[must_use]
    pub fn status_in<I>(statuses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<EffectiveStatus<S>>,
    {
        Self::StatusIn(statuses.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn status_not_in<I>(statuses: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<EffectiveStatus<S>>,
    {
        Self::StatusNotIn(statuses.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn field_eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldEq {
            field: field.into(),
            value: value.into(),
        }
    }
}

///
/// Reducer
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reducer<S> {
    Count {
        predicate: Option<KpiPredicate<S>>,
    },
    Sum {
        measure: Measure,
        predicate: Option<KpiPredicate<S>>,
    },
    Average {
        measure: Measure,
        predicate: Option<KpiPredicate<S>>,
    },
    Min {
        measure: Measure,
        predicate: Option<KpiPredicate<S>>,
    },
    Max {
        measure: Measure,
        predicate: Option<KpiPredicate<S>>,
    },
}

impl<S> Reducer<S> {
    #[must_use]
    pub const fn predicate(&self) -> Option<&KpiPredicate<S>> {
        match self {
            Self::Count { predicate }
            | Self::Sum { predicate, .. }
            | Self::Average { predicate, .. }
            | Self::Min { predicate, .. }
            | Self::Max { predicate, .. } => predicate.as_ref(),
        }
    }

    #[must_use]
    pub const fn measure(&self) -> Option<&Measure> {
        match self {
            Self::Count { .. } => None,
            Self::Sum { measure, .. }
            | Self::Average { measure, .. }
            | Self::Min { measure, .. }
            | Self::Max { measure, .. } => Some(measure),
        }
    }
}

///
/// KpiSpec
/// Named reducer; `key` is the output name in the summary.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KpiSpec<S> {
    pub key: String,
    pub reducer: Reducer<S>,
}

impl<S> KpiSpec<S> {
    #[must_use]
    pub fn new(key: impl Into<String>, reducer: Reducer<S>) -> Self {
        Self {
            key: key.into(),
            reducer,
        }
    }

    #[must_use]
    pub fn count(key: impl Into<String>) -> Self {
        Self::new(key, Reducer::Count { predicate: None })
    }

    #[must_use]
    pub fn count_where(key: impl Into<String>, predicate: KpiPredicate<S>) -> Self {
        Self::new(
            key,
            Reducer::Count {
                predicate: Some(predicate),
            },
        )
    }

    #[must_use]
    pub fn sum(key: impl Into<String>, measure: Measure) -> Self {
        Self::new(
            key,
            Reducer::Sum {
                measure,
                predicate: None,
            },
        )
    }

    #[must_use]
    pub fn sum_where(key: impl Into<String>, measure: Measure, predicate: KpiPredicate<S>) -> Self {
        Self::new(
            key,
            Reducer::Sum {
                measure,
                predicate: Some(predicate),
            },
        )
    }

    #[must_use]
    pub fn average(key: impl Into<String>, measure: Measure) -> Self {
        Self::new(
            key,
            Reducer::Average {
                measure,
                predicate: None,
            },
        )
    }

    #[must_use]
    pub fn average_where(
        key: impl Into<String>,
        measure: Measure,
        predicate: KpiPredicate<S>,
    ) -> Self {
        Self::new(
            key,
            Reducer::Average {
                measure,
                predicate: Some(predicate),
            },
        )
    }

    #[must_use]
    pub fn min(key: impl Into<String>, measure: Measure) -> Self {
        Self::new(
            key,
            Reducer::Min {
                measure,
                predicate: None,
            },
        )
    }

    #[must_use]
    pub fn max(key: impl Into<String>, measure: Measure) -> Self {
        Self::new(
            key,
            Reducer::Max {
                measure,
                predicate: None,
            },
        )
    }
}
