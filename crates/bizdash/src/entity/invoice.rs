use crate::entity::DashboardEntity;
use bizdash_config::ViewId;
use bizdash_core::{
    db::aggregate::{KpiPredicate, KpiSpec, Measure},
    prelude::*,
};
use serde::{Deserialize, Serialize};

///
/// InvoiceStatus
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Cancelled,
}

impl StatusKind for InvoiceStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Cancelled)
    }
}

///
/// Invoice
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub customer: String,
    pub tax_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    pub issue_date: Date,
    pub due_date: Date,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Amount still owed.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.amount.saturating_sub(self.paid_amount)
    }
}

static FIELDS: [FieldModel; 9] = [
    FieldModel::new("id", FieldKind::Text),
    FieldModel::new("number", FieldKind::Text),
    FieldModel::new("customer", FieldKind::Text),
    FieldModel::new("tax_id", FieldKind::Text),
    FieldModel::new("amount", FieldKind::Decimal),
    FieldModel::new("paid_amount", FieldKind::Decimal),
    FieldModel::new("issue_date", FieldKind::Date),
    FieldModel::new("due_date", FieldKind::Date),
    FieldModel::new("status", FieldKind::Enum),
];

pub static INVOICE_MODEL: RecordModel = RecordModel {
    path: "bizdash::entity::Invoice",
    entity_name: "invoice",
    primary_key: &FIELDS[0],
    fields: &FIELDS,
    searchable: &["number", "customer", "tax_id"],
    overdue_label: "overdue",
};

impl FieldValues for Invoice {
    fn get_value_by_index(&self, index: usize) -> Option<Value> {
        let value = match index {
            0 => Value::from(self.id.as_str()),
            1 => Value::from(self.number.as_str()),
            2 => Value::from(self.customer.as_str()),
            3 => Value::from(self.tax_id.as_str()),
            4 => Value::Decimal(self.amount),
            5 => Value::Decimal(self.paid_amount),
            6 => Value::Date(self.issue_date),
            7 => Value::Date(self.due_date),
            8 => Value::Enum(self.status.as_str()),
            _ => return None,
        };

        Some(value)
    }
}

impl Record for Invoice {
    type Status = InvoiceStatus;

    const MODEL: &'static RecordModel = &INVOICE_MODEL;

    fn id(&self) -> &str {
        &self.id
    }

    fn stored_status(&self) -> Self::Status {
        self.status
    }

    fn status_date(&self) -> Option<Date> {
        Some(self.due_date)
    }
}

impl DashboardEntity for Invoice {
    const VIEW: ViewId = ViewId::Invoices;

    fn default_kpis() -> Vec<KpiSpec<InvoiceStatus>> {
        let open = || KpiPredicate::status_not_in([InvoiceStatus::Paid, InvoiceStatus::Cancelled]);
        let overdue = || KpiPredicate::status_in([EffectiveStatus::Overdue]);
        let outstanding = || Measure::difference("amount", "paid_amount");

        vec![
            KpiSpec::count("count"),
            KpiSpec::sum("total_amount", Measure::field("amount")),
            KpiSpec::sum("received_amount", Measure::field("paid_amount")),
            KpiSpec::sum_where("outstanding_amount", outstanding(), open()),
            KpiSpec::sum_where("overdue_amount", outstanding(), overdue()),
            KpiSpec::count_where("overdue_count", overdue()),
            KpiSpec::count_where(
                "due_soon_count",
                KpiPredicate::status_in([EffectiveStatus::DueSoon]),
            ),
            KpiSpec::average("average_amount", Measure::field("amount")),
        ]
    }
}
