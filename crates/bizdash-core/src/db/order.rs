use crate::{
    db::query::OrderDirection,
    traits::FieldValues,
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// OrderProgram
///
/// Slot-resolved ordering. Sort keys are read once per row; comparison
/// runs over the cached keys. Descending keys reverse the comparator,
/// never the sorted output, so ties keep their input order.
///

#[derive(Clone, Debug)]
pub(crate) struct OrderProgram {
    keys: Vec<(usize, OrderDirection)>,
}

impl OrderProgram {
    #[must_use]
    pub(crate) const fn new(keys: Vec<(usize, OrderDirection)>) -> Self {
        Self { keys }
    }

    #[must_use]
    pub(crate) const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    /// Read the sort key values of one record.
    #[must_use]
    pub(crate) fn sort_keys<R: FieldValues>(&self, record: &R) -> Vec<Value> {
        self.keys
            .iter()
            .map(|(slot, _)| record.get_value_by_index(*slot).unwrap_or(Value::Null))
            .collect()
    }

    /// Compare two rows' cached sort keys.
    #[must_use]
    pub(crate) fn compare(&self, left: &[Value], right: &[Value]) -> Ordering {
        for ((_, direction), (left, right)) in self.keys.iter().zip(left.iter().zip(right)) {
            let cmp = canonical_cmp(left, right);
            let cmp = match direction {
                OrderDirection::Asc => cmp,
                OrderDirection::Desc => cmp.reverse(),
            };

            if cmp != Ordering::Equal {
                return cmp;
            }
        }

        Ordering::Equal
    }

    /// Stable in-place sort of rows by their cached keys.
    pub(crate) fn sort<T>(&self, rows: &mut [T], keys_of: impl Fn(&T) -> &[Value]) {
        if self.is_empty() {
            return;
        }

        rows.sort_by(|left, right| self.compare(keys_of(left), keys_of(right)));
    }
}
