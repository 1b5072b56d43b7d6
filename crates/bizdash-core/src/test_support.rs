//! Test-only record fixtures shared by the core test suites.

use crate::{
    model::{FieldKind, FieldModel, RecordModel},
    traits::{FieldValues, Record, StatusKind},
    types::{Date, Decimal},
    value::Value,
};

pub(crate) fn date(y: i32, m: u8, d: u8) -> Date {
    Date::new_checked(y, m, d).expect("fixture date should be valid")
}

///
/// BillState
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum BillState {
    Draft,
    Pending,
    Paid,
    Cancelled,
}

impl StatusKind for BillState {
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
/// Bill
/// Minimal invoice-shaped record.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Bill {
    pub(crate) id: String,
    pub(crate) customer: String,
    pub(crate) tax_id: String,
    pub(crate) amount: Decimal,
    pub(crate) paid_amount: Decimal,
    pub(crate) due_date: Option<Date>,
    pub(crate) tags: Vec<String>,
    pub(crate) status: BillState,
}

impl Bill {
    pub(crate) fn new(id: &str, amount: i64, due: Option<Date>, status: BillState) -> Self {
        Self {
            id: id.to_string(),
            customer: format!("Customer {id}"),
            tax_id: format!("00.000.000/0001-{id}"),
            amount: Decimal::from(amount),
            paid_amount: Decimal::ZERO,
            due_date: due,
            tags: Vec::new(),
            status,
        }
    }

    pub(crate) fn customer(mut self, customer: &str) -> Self {
        self.customer = customer.to_string();
        self
    }

    pub(crate) fn paid(mut self, paid_amount: i64) -> Self {
        self.paid_amount = Decimal::from(paid_amount);
        self
    }

    pub(crate) fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }
}

static BILL_FIELDS: [FieldModel; 8] = [
    FieldModel::new("id", FieldKind::Text),
    FieldModel::new("customer", FieldKind::Text),
    FieldModel::new("tax_id", FieldKind::Text),
    FieldModel::new("amount", FieldKind::Decimal),
    FieldModel::new("paid_amount", FieldKind::Decimal),
    FieldModel::new("due_date", FieldKind::Date),
    FieldModel::new("tags", FieldKind::List),
    FieldModel::new("status", FieldKind::Enum),
];

pub(crate) static BILL_MODEL: RecordModel = RecordModel {
    path: "bizdash_core::test_support::Bill",
    entity_name: "bill",
    primary_key: &BILL_FIELDS[0],
    fields: &BILL_FIELDS,
    searchable: &["id", "customer", "tax_id"],
    overdue_label: "overdue",
};

impl FieldValues for Bill {
    fn get_value_by_index(&self, index: usize) -> Option<Value> {
        let value = match index {
            0 => Value::from(self.id.as_str()),
            1 => Value::from(self.customer.as_str()),
            2 => Value::from(self.tax_id.as_str()),
            3 => Value::Decimal(self.amount),
            4 => Value::Decimal(self.paid_amount),
            5 => Value::from(self.due_date),
            6 => Value::from(self.tags.clone()),
            7 => Value::Enum(self.status.as_str()),
            _ => return None,
        };

        Some(value)
    }
}

impl Record for Bill {
    type Status = BillState;

    const MODEL: &'static RecordModel = &BILL_MODEL;

    fn id(&self) -> &str {
        &self.id
    }

    fn stored_status(&self) -> Self::Status {
        self.status
    }

    fn status_date(&self) -> Option<Date> {
        self.due_date
    }
}
