use crate::entity::DashboardEntity;
use bizdash_config::ViewId;
use bizdash_core::{
    db::aggregate::{KpiPredicate, KpiSpec, Measure},
    prelude::*,
};
use serde::{Deserialize, Serialize};

///
/// SupplierStatus
///
/// Only active suppliers are judged against their contract end date; a
/// lapsed contract shows as `expired`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplierStatus {
    Active,
    Inactive,
    Blocked,
}

impl StatusKind for SupplierStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Blocked => "blocked",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

///
/// Supplier
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub category: String,
    pub city: String,
    /// 0 to 5.
    pub rating: Decimal,
    #[serde(default)]
    pub contract_end: Option<Date>,
    pub status: SupplierStatus,
}

static FIELDS: [FieldModel; 8] = [
    FieldModel::new("id", FieldKind::Text),
    FieldModel::new("name", FieldKind::Text),
    FieldModel::new("tax_id", FieldKind::Text),
    FieldModel::new("category", FieldKind::Text),
    FieldModel::new("city", FieldKind::Text),
    FieldModel::new("rating", FieldKind::Decimal),
    FieldModel::new("contract_end", FieldKind::Date),
    FieldModel::new("status", FieldKind::Enum),
];

pub static SUPPLIER_MODEL: RecordModel = RecordModel {
    path: "bizdash::entity::Supplier",
    entity_name: "supplier",
    primary_key: &FIELDS[0],
    fields: &FIELDS,
    searchable: &["name", "tax_id", "category", "city"],
    overdue_label: "expired",
};

impl FieldValues for Supplier {
    fn get_value_by_index(&self, index: usize) -> Option<Value> {
        let value = match index {
            0 => Value::from(self.id.as_str()),
            1 => Value::from(self.name.as_str()),
            2 => Value::from(self.tax_id.as_str()),
            3 => Value::from(self.category.as_str()),
            4 => Value::from(self.city.as_str()),
            5 => Value::Decimal(self.rating),
            6 => Value::from(self.contract_end),
            7 => Value::Enum(self.status.as_str()),
            _ => return None,
        };

        Some(value)
    }
}

impl Record for Supplier {
    type Status = SupplierStatus;

    const MODEL: &'static RecordModel = &SUPPLIER_MODEL;

    fn id(&self) -> &str {
        &self.id
    }

    fn stored_status(&self) -> Self::Status {
        self.status
    }

    fn status_date(&self) -> Option<Date> {
        self.contract_end
    }
}

impl DashboardEntity for Supplier {
    const VIEW: ViewId = ViewId::Suppliers;

    fn default_kpis() -> Vec<KpiSpec<SupplierStatus>> {
        vec![
            KpiSpec::count("count"),
            KpiSpec::count_where(
                "active_count",
                KpiPredicate::status_in([
                    EffectiveStatus::Stored(SupplierStatus::Active),
                    EffectiveStatus::DueSoon,
                ]),
            ),
            KpiSpec::count_where(
                "expiring_count",
                KpiPredicate::status_in([EffectiveStatus::DueSoon]),
            ),
            KpiSpec::count_where(
                "expired_count",
                KpiPredicate::status_in([EffectiveStatus::Overdue]),
            ),
            KpiSpec::average("average_rating", Measure::field("rating")),
        ]
    }
}
