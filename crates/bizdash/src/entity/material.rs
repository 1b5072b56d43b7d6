use crate::entity::DashboardEntity;
use bizdash_config::ViewId;
use bizdash_core::{
    db::aggregate::{KpiPredicate, KpiSpec, Measure},
    prelude::*,
};
use serde::{Deserialize, Serialize};

///
/// MaterialStatus
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialStatus {
    Planned,
    Ordered,
    Received,
    Cancelled,
}

impl StatusKind for MaterialStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Ordered => "ordered",
            Self::Received => "received",
            Self::Cancelled => "cancelled",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Received | Self::Cancelled)
    }
}

///
/// MaterialRequirement
/// Material a project needs on site by a given date.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MaterialRequirement {
    pub id: String,
    pub material: String,
    pub project: String,
    pub supplier: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_cost: Decimal,
    #[serde(default)]
    pub needed_by: Option<Date>,
    pub status: MaterialStatus,
}

impl MaterialRequirement {
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.unit_cost.saturating_mul(Decimal::from(self.quantity))
    }
}

static FIELDS: [FieldModel; 10] = [
    FieldModel::new("id", FieldKind::Text),
    FieldModel::new("material", FieldKind::Text),
    FieldModel::new("project", FieldKind::Text),
    FieldModel::new("supplier", FieldKind::Text),
    FieldModel::new("quantity", FieldKind::Int),
    FieldModel::new("unit", FieldKind::Text),
    FieldModel::new("unit_cost", FieldKind::Decimal),
    FieldModel::new("total_cost", FieldKind::Decimal),
    FieldModel::new("needed_by", FieldKind::Date),
    FieldModel::new("status", FieldKind::Enum),
];

pub static MATERIAL_MODEL: RecordModel = RecordModel {
    path: "bizdash::entity::MaterialRequirement",
    entity_name: "material",
    primary_key: &FIELDS[0],
    fields: &FIELDS,
    searchable: &["material", "project", "supplier"],
    overdue_label: "overdue",
};

impl FieldValues for MaterialRequirement {
    fn get_value_by_index(&self, index: usize) -> Option<Value> {
        let value = match index {
            0 => Value::from(self.id.as_str()),
            1 => Value::from(self.material.as_str()),
            2 => Value::from(self.project.as_str()),
            3 => Value::from(self.supplier.as_str()),
            4 => Value::Int(self.quantity),
            5 => Value::from(self.unit.as_str()),
            6 => Value::Decimal(self.unit_cost),
            7 => Value::Decimal(self.total_cost()),
            8 => Value::from(self.needed_by),
            9 => Value::Enum(self.status.as_str()),
            _ => return None,
        };

        Some(value)
    }
}

impl Record for MaterialRequirement {
    type Status = MaterialStatus;

    const MODEL: &'static RecordModel = &MATERIAL_MODEL;

    fn id(&self) -> &str {
        &self.id
    }

    fn stored_status(&self) -> Self::Status {
        self.status
    }

    fn status_date(&self) -> Option<Date> {
        self.needed_by
    }
}

impl DashboardEntity for MaterialRequirement {
    const VIEW: ViewId = ViewId::Materials;

    fn default_kpis() -> Vec<KpiSpec<MaterialStatus>> {
        vec![
            KpiSpec::count("count"),
            KpiSpec::sum("total_cost", Measure::field("total_cost")),
            KpiSpec::sum_where(
                "pending_cost",
                Measure::field("total_cost"),
                KpiPredicate::status_not_in([MaterialStatus::Received, MaterialStatus::Cancelled]),
            ),
            KpiSpec::count_where(
                "overdue_count",
                KpiPredicate::status_in([EffectiveStatus::Overdue]),
            ),
            KpiSpec::max("largest_cost", Measure::field("total_cost")),
        ]
    }
}
