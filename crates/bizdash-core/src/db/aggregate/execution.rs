use crate::{
    clock::Clock,
    db::{
        aggregate::{KpiPredicate, KpiSpec, KpiSummary, KpiValue, Measure, Reducer},
        query::{
            QueryError,
            validate::{resolve_fields, resolve_numeric_field},
        },
    },
    model::RecordModel,
    obs::sink::{self, MetricsEvent},
    status::{EffectiveStatus, StatusResolver},
    traits::{FieldValues, Record},
    types::Decimal,
    value::{Value, canonical_cmp},
};
use std::{cmp::Ordering, collections::BTreeSet};

/// Reduce `records` into the KPIs named by `specs`.
///
/// Predicates see effective status, resolved against one consistent
/// "today" for the whole set. Callers pass the filtered set; passing the
/// full collection or one page gives numbers that will not reconcile with
/// the list counters.
pub fn summarize<R, C>(
    records: &[R],
    specs: &[KpiSpec<R::Status>],
    resolver: &StatusResolver<C>,
) -> Result<KpiSummary, QueryError>
where
    R: Record,
    C: Clock,
{
    let program = KpiProgram::compile(R::MODEL, specs)?;
    let today = resolver.clock().today();

    Ok(program.evaluate(
        records
            .iter()
            .map(|record| (record, resolver.resolve_on(record, today))),
    ))
}

///
/// ResolvedMeasure
///

#[derive(Clone, Copy, Debug)]
enum ResolvedMeasure {
    Field(usize),
    Difference { minuend: usize, subtrahend: usize },
}

impl ResolvedMeasure {
    fn compile(model: &RecordModel, measure: &Measure) -> Result<Self, QueryError> {
        match measure {
            Measure::Field(field) => Ok(Self::Field(resolve_numeric_field(model, field)?)),
            Measure::Difference {
                minuend,
                subtrahend,
            } => Ok(Self::Difference {
                minuend: resolve_numeric_field(model, minuend)?,
                subtrahend: resolve_numeric_field(model, subtrahend)?,
            }),
        }
    }

    // Null or missing minuends measure nothing; a missing subtrahend
    // counts as zero (nothing paid yet).
    fn read<R: FieldValues>(self, record: &R) -> Option<Decimal> {
        let numeric = |slot: usize| {
            record
                .get_value_by_index(slot)
                .and_then(|value| value.as_decimal())
        };

        match self {
            Self::Field(slot) => numeric(slot),
            Self::Difference {
                minuend,
                subtrahend,
            } => {
                let minuend = numeric(minuend)?;
                let subtrahend = numeric(subtrahend).unwrap_or(Decimal::ZERO);

                Some(minuend.saturating_sub(subtrahend))
            }
        }
    }
}

///
/// ResolvedPredicate
///

#[derive(Clone, Debug)]
enum ResolvedPredicate<S> {
    StatusIn(BTreeSet<EffectiveStatus<S>>),
    StatusNotIn(BTreeSet<EffectiveStatus<S>>),
    FieldEq { slot: usize, value: Value },
    And(Vec<Self>),
}

impl<S: Clone + Ord> ResolvedPredicate<S> {
    fn compile(model: &RecordModel, predicate: &KpiPredicate<S>) -> Result<Self, QueryError> {
        let resolved = match predicate {
            KpiPredicate::StatusIn(statuses) => Self::StatusIn(statuses.clone()),
            KpiPredicate::StatusNotIn(statuses) => Self::StatusNotIn(statuses.clone()),
            KpiPredicate::FieldEq { field, value } => Self::FieldEq {
                slot: resolve_fields(model, &[field])?[0],
                value: value.clone(),
            },
            KpiPredicate::And(children) => Self::And(
                children
                    .iter()
                    .map(|child| Self::compile(model, child))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(resolved)
    }

    fn eval<R: FieldValues>(&self, record: &R, status: &EffectiveStatus<S>) -> bool {
        match self {
            Self::StatusIn(statuses) => statuses.contains(status),
            Self::StatusNotIn(statuses) => !statuses.contains(status),
            Self::FieldEq { slot, value } => record
                .get_value_by_index(*slot)
                .is_some_and(|actual| values_equal(&actual, value)),
            Self::And(children) => children.iter().all(|child| child.eval(record, status)),
        }
    }
}

// Text and enum labels compare by content; everything else canonically.
fn values_equal(actual: &Value, expected: &Value) -> bool {
    match (actual.as_text(), expected.as_text()) {
        (Some(a), Some(b)) => a == b,
        _ => canonical_cmp(actual, expected) == Ordering::Equal,
    }
}

///
/// ReducerKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ReducerKind {
    Count,
    Sum,
    Average,
    Min,
    Max,
}

///
/// ResolvedKpi
///

#[derive(Clone, Debug)]
struct ResolvedKpi<S> {
    key: String,
    kind: ReducerKind,
    measure: Option<ResolvedMeasure>,
    predicate: Option<ResolvedPredicate<S>>,
}

///
/// Accumulator
/// Per-KPI fold state for one pass over the rows.
///

#[derive(Clone, Copy, Debug, Default)]
struct Accumulator {
    rows: u64,
    measured: u64,
    sum: Decimal,
    min: Option<Decimal>,
    max: Option<Decimal>,
}

impl Accumulator {
    fn observe(&mut self, measured: Option<Decimal>) {
        self.rows = self.rows.saturating_add(1);

        let Some(value) = measured else {
            return;
        };

        self.measured = self.measured.saturating_add(1);
        self.sum = self.sum.saturating_add(value);
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }

    fn finish(self, kind: ReducerKind) -> KpiValue {
        match kind {
            ReducerKind::Count => KpiValue::Count(self.rows),
            ReducerKind::Sum => KpiValue::Amount(self.sum),
            ReducerKind::Average => {
                if self.measured == 0 {
                    KpiValue::Amount(Decimal::ZERO)
                } else {
                    let average = self
                        .sum
                        .checked_div(Decimal::from(self.measured))
                        .unwrap_or(Decimal::ZERO);
                    KpiValue::Amount(average.normalize())
                }
            }
            ReducerKind::Min => KpiValue::Amount(self.min.unwrap_or(Decimal::ZERO)),
            ReducerKind::Max => KpiValue::Amount(self.max.unwrap_or(Decimal::ZERO)),
        }
    }
}

///
/// KpiProgram
///
/// Slot-resolved KPI specs. Field names are validated once when the
/// program is compiled; evaluation is a single pass over the rows.
///

#[derive(Clone, Debug)]
pub(crate) struct KpiProgram<S> {
    kpis: Vec<ResolvedKpi<S>>,
}

impl<S> Default for KpiProgram<S> {
    fn default() -> Self {
        Self { kpis: Vec::new() }
    }
}

impl<S: Clone + Ord> KpiProgram<S> {
    pub(crate) fn compile(model: &RecordModel, specs: &[KpiSpec<S>]) -> Result<Self, QueryError> {
        let kpis = specs
            .iter()
            .map(|spec| {
                let kind = match spec.reducer {
                    Reducer::Count { .. } => ReducerKind::Count,
                    Reducer::Sum { .. } => ReducerKind::Sum,
                    Reducer::Average { .. } => ReducerKind::Average,
                    Reducer::Min { .. } => ReducerKind::Min,
                    Reducer::Max { .. } => ReducerKind::Max,
                };
                let measure = spec
                    .reducer
                    .measure()
                    .map(|measure| ResolvedMeasure::compile(model, measure))
                    .transpose()?;
                let predicate = spec
                    .reducer
                    .predicate()
                    .map(|predicate| ResolvedPredicate::compile(model, predicate))
                    .transpose()?;

                Ok(ResolvedKpi {
                    key: spec.key.clone(),
                    kind,
                    measure,
                    predicate,
                })
            })
            .collect::<Result<Vec<_>, QueryError>>()?;

        Ok(Self { kpis })
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.kpis.len()
    }

    /// Fold every row into every KPI in one pass.
    pub(crate) fn evaluate<'r, R>(
        &self,
        rows: impl IntoIterator<Item = (&'r R, EffectiveStatus<S>)>,
    ) -> KpiSummary
    where
        R: Record<Status = S> + 'r,
    {
        let mut accumulators = vec![Accumulator::default(); self.kpis.len()];

        for (row, status) in rows {
            for (kpi, acc) in self.kpis.iter().zip(accumulators.iter_mut()) {
                let admitted = kpi
                    .predicate
                    .as_ref()
                    .is_none_or(|predicate| predicate.eval(row, &status));
                if !admitted {
                    continue;
                }

                acc.observe(kpi.measure.and_then(|measure| measure.read(row)));
            }
        }

        let mut summary = KpiSummary::default();
        for (kpi, acc) in self.kpis.iter().zip(accumulators) {
            summary.insert(kpi.key.clone(), acc.finish(kpi.kind));
        }

        sink::record(MetricsEvent::Summarized {
            entity_path: R::MODEL.path,
            kpis: u32::try_from(self.kpis.len()).unwrap_or(u32::MAX),
        });

        summary
    }
}
