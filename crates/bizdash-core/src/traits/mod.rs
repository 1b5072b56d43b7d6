use crate::{
    model::{RecordModel, resolve_field_slot},
    types::Date,
    value::Value,
};
use std::{fmt::Debug, hash::Hash};

///
/// StatusKind
///
/// Stored status vocabulary of one record type.
///

pub trait StatusKind: Copy + Debug + Eq + Hash + Ord + 'static {
    /// Stable lowercase label (`pending`, `paid`, ...).
    fn as_str(self) -> &'static str;

    /// Closed states: time-based derivation never applies to them.
    fn is_terminal(self) -> bool;
}

///
/// FieldValues
///
/// Slot-indexed field access. Slots follow the order of
/// `RecordModel::fields`; an out-of-range slot yields `None`.
///

pub trait FieldValues {
    fn get_value_by_index(&self, index: usize) -> Option<Value>;
}

///
/// Record
///
/// One identified business entity held in a snapshot. Implementors expose
/// their model, their id, their stored status, and the date that drives
/// status derivation (due date, delivery date, ...).
///

pub trait Record: FieldValues {
    type Status: StatusKind;

    const MODEL: &'static RecordModel;

    fn id(&self) -> &str;

    fn stored_status(&self) -> Self::Status;

    /// Date compared against "today" during status derivation.
    fn status_date(&self) -> Option<Date>;

    /// Read a field by name; `None` when the model has no such field.
    fn get_value(&self, field_name: &str) -> Option<Value> {
        resolve_field_slot(Self::MODEL, field_name).and_then(|slot| self.get_value_by_index(slot))
    }
}
