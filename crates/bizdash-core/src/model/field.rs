///
/// FieldModel
/// Runtime field metadata used by query validation and slot resolution.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in sort keys, search lists, and KPI measures.
    pub name: &'static str,
    /// Runtime type shape.
    pub kind: FieldKind,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

///
/// FieldKind
///
/// Minimal type surface needed by the engine. Aligned with `Value`
/// variants; optional fields use the kind of their present value.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Date,
    Decimal,
    Enum,
    Int,
    Text,

    /// Marker for list-valued fields: searchable, never orderable.
    List,
}

impl FieldKind {
    #[must_use]
    pub const fn is_orderable(self) -> bool {
        !matches!(self, Self::List)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Decimal | Self::Int)
    }
}
