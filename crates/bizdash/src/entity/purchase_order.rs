use crate::entity::DashboardEntity;
use bizdash_config::ViewId;
use bizdash_core::{
    db::aggregate::{KpiPredicate, KpiSpec, Measure},
    prelude::*,
};
use serde::{Deserialize, Serialize};

///
/// PurchaseOrderStatus
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Draft,
    Sent,
    Confirmed,
    Delivered,
    Cancelled,
}

impl StatusKind for PurchaseOrderStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

///
/// PurchaseOrder
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub number: String,
    pub supplier: String,
    pub amount: Decimal,
    pub order_date: Date,
    #[serde(default)]
    pub expected_delivery: Option<Date>,
    pub status: PurchaseOrderStatus,
}

static FIELDS: [FieldModel; 7] = [
    FieldModel::new("id", FieldKind::Text),
    FieldModel::new("number", FieldKind::Text),
    FieldModel::new("supplier", FieldKind::Text),
    FieldModel::new("amount", FieldKind::Decimal),
    FieldModel::new("order_date", FieldKind::Date),
    FieldModel::new("expected_delivery", FieldKind::Date),
    FieldModel::new("status", FieldKind::Enum),
];

pub static PURCHASE_ORDER_MODEL: RecordModel = RecordModel {
    path: "bizdash::entity::PurchaseOrder",
    entity_name: "purchase_order",
    primary_key: &FIELDS[0],
    fields: &FIELDS,
    searchable: &["number", "supplier"],
    overdue_label: "delayed",
};

impl FieldValues for PurchaseOrder {
    fn get_value_by_index(&self, index: usize) -> Option<Value> {
        let value = match index {
            0 => Value::from(self.id.as_str()),
            1 => Value::from(self.number.as_str()),
            2 => Value::from(self.supplier.as_str()),
            3 => Value::Decimal(self.amount),
            4 => Value::Date(self.order_date),
            5 => Value::from(self.expected_delivery),
            6 => Value::Enum(self.status.as_str()),
            _ => return None,
        };

        Some(value)
    }
}

impl Record for PurchaseOrder {
    type Status = PurchaseOrderStatus;

    const MODEL: &'static RecordModel = &PURCHASE_ORDER_MODEL;

    fn id(&self) -> &str {
        &self.id
    }

    fn stored_status(&self) -> Self::Status {
        self.status
    }

    fn status_date(&self) -> Option<Date> {
        self.expected_delivery
    }
}

impl DashboardEntity for PurchaseOrder {
    const VIEW: ViewId = ViewId::PurchaseOrders;

    fn default_kpis() -> Vec<KpiSpec<PurchaseOrderStatus>> {
        let delayed = || KpiPredicate::status_in([EffectiveStatus::Overdue]);

        vec![
            KpiSpec::count("count"),
            KpiSpec::sum("total_amount", Measure::field("amount")),
            KpiSpec::sum_where(
                "open_amount",
                Measure::field("amount"),
                KpiPredicate::status_not_in([
                    PurchaseOrderStatus::Draft,
                    PurchaseOrderStatus::Delivered,
                    PurchaseOrderStatus::Cancelled,
                ]),
            ),
            KpiSpec::count_where("delayed_count", delayed()),
            KpiSpec::sum_where("delayed_amount", Measure::field("amount"), delayed()),
        ]
    }
}
