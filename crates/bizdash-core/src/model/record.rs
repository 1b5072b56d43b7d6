use crate::model::field::FieldModel;

///
/// RecordModel
/// Static runtime model for one record type.
///

#[derive(Debug)]
pub struct RecordModel {
    /// Fully-qualified Rust type path (for metrics and diagnostics).
    pub path: &'static str,
    /// Stable external name used in errors and routing.
    pub entity_name: &'static str,
    /// Identifier field (points at an entry in `fields`).
    pub primary_key: &'static FieldModel,
    /// Ordered field list; a field's position is its slot.
    pub fields: &'static [FieldModel],
    /// Fields matched by free-text search unless a view overrides them.
    pub searchable: &'static [&'static str],
    /// Label of the derived past-due status (`overdue`, `delayed`, ...).
    pub overdue_label: &'static str,
}

impl RecordModel {
    /// Look up a field model by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Resolve a field name to its stable slot in the model's field list.
#[must_use]
pub fn resolve_field_slot(model: &RecordModel, field_name: &str) -> Option<usize> {
    model
        .fields
        .iter()
        .position(|field| field.name == field_name)
}
