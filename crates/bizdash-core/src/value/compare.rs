use crate::value::{Value, collate};
use std::cmp::Ordering;

/// Total order over values, shared by sorting and KPI extrema.
///
/// Values of different families order by family rank, null first.
/// Integers and decimals share a rank and compare numerically; text and
/// enum labels go through locale-aware collation.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    left.canonical_rank()
        .cmp(&right.canonical_rank())
        .then_with(|| cmp_within_rank(left, right))
}

fn cmp_within_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => collate(a, b),
        (Value::Enum(a), Value::Enum(b)) => collate(a, b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => cmp_lists(a, b),
        // Int/Int, Decimal/Decimal and the mixed pairs
        (a, b) => match (a.as_decimal(), b.as_decimal()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        },
    }
}

// lexicographic, shorter prefix first
fn cmp_lists(left: &[Value], right: &[Value]) -> Ordering {
    left.iter()
        .zip(right)
        .map(|(l, r)| canonical_cmp(l, r))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| left.len().cmp(&right.len()))
}
