use super::*;
use bizdash_core::{
    clock::FixedClock,
    db::RecordCollectionEngine,
    prelude::*,
    status::StatusResolver,
};

fn date(y: i32, m: u8, d: u8) -> Date {
    Date::new_checked(y, m, d).expect("valid date")
}

fn resolver() -> StatusResolver<FixedClock> {
    StatusResolver::new(FixedClock::at_date(date(2024, 3, 1)))
}

fn assert_kpis_compile<E: DashboardEntity>() {
    let result = RecordCollectionEngine::<E, _>::new(resolver()).with_kpis(&E::default_kpis());

    assert!(result.is_ok(), "{} kpis: {:?}", E::MODEL.entity_name, result.err());
}

fn assert_every_field_readable<E: DashboardEntity>(record: &E) {
    for field in E::MODEL.fields {
        assert!(
            record.get_value(field.name).is_some(),
            "{}.{} has no slot",
            E::MODEL.entity_name,
            field.name
        );
    }
    assert_eq!(record.get_value(E::MODEL.primary_key.name), Some(Value::from(record.id())));
}

fn invoice() -> Invoice {
    Invoice {
        id: "inv-1".to_string(),
        number: "NF-1001".to_string(),
        customer: "Construtora Alfa".to_string(),
        tax_id: "12.345.678/0001-90".to_string(),
        amount: Decimal::from(1500),
        paid_amount: Decimal::from(500),
        issue_date: date(2024, 1, 15),
        due_date: date(2024, 2, 15),
        status: InvoiceStatus::Pending,
    }
}

fn task() -> Task {
    Task {
        id: "t-1".to_string(),
        title: "Pour foundation".to_string(),
        project: "Residencial Sol".to_string(),
        assignee: "Marta".to_string(),
        priority: TaskPriority::High,
        due_date: Some(date(2024, 3, 4)),
        status: TaskStatus::InProgress,
    }
}

fn supplier() -> Supplier {
    Supplier {
        id: "s-1".to_string(),
        name: "Cimento Forte".to_string(),
        tax_id: "98.765.432/0001-10".to_string(),
        category: "cement".to_string(),
        city: "Curitiba".to_string(),
        rating: Decimal::new(45, 1),
        contract_end: Some(date(2024, 2, 1)),
        status: SupplierStatus::Active,
    }
}

fn material() -> MaterialRequirement {
    MaterialRequirement {
        id: "m-1".to_string(),
        material: "Rebar 10mm".to_string(),
        project: "Residencial Sol".to_string(),
        supplier: "Aço Norte".to_string(),
        quantity: 40,
        unit: "bar".to_string(),
        unit_cost: Decimal::new(2550, 2),
        needed_by: None,
        status: MaterialStatus::Ordered,
    }
}

fn purchase_order(status: PurchaseOrderStatus) -> PurchaseOrder {
    PurchaseOrder {
        id: "po-1".to_string(),
        number: "PO-77".to_string(),
        supplier: "Cimento Forte".to_string(),
        amount: Decimal::from(8000),
        order_date: date(2024, 1, 10),
        expected_delivery: Some(date(2024, 2, 20)),
        status,
    }
}

#[test]
fn default_kpis_compile_for_every_entity() {
    assert_kpis_compile::<Invoice>();
    assert_kpis_compile::<Task>();
    assert_kpis_compile::<Supplier>();
    assert_kpis_compile::<MaterialRequirement>();
    assert_kpis_compile::<PurchaseOrder>();
}

#[test]
fn model_fields_match_slots() {
    assert_every_field_readable(&invoice());
    assert_every_field_readable(&task());
    assert_every_field_readable(&supplier());
    assert_every_field_readable(&material());
    assert_every_field_readable(&purchase_order(PurchaseOrderStatus::Sent));
}

#[test]
fn late_purchase_order_reads_as_delayed() {
    let status = resolver().resolve(&purchase_order(PurchaseOrderStatus::Confirmed));

    assert_eq!(status, EffectiveStatus::Overdue);
    assert_eq!(status.label(&PURCHASE_ORDER_MODEL), "delayed");
}

#[test]
fn past_due_draft_purchase_order_is_delayed() {
    let status = resolver().resolve(&purchase_order(PurchaseOrderStatus::Draft));

    assert_eq!(status, EffectiveStatus::Overdue);
}

#[test]
fn delivered_purchase_order_is_never_delayed() {
    let status = resolver().resolve(&purchase_order(PurchaseOrderStatus::Delivered));

    assert_eq!(status, EffectiveStatus::Stored(PurchaseOrderStatus::Delivered));
}

#[test]
fn lapsed_supplier_contract_reads_as_expired() {
    let status = resolver().resolve(&supplier());

    assert_eq!(status.label(&SUPPLIER_MODEL), "expired");

    let blocked = Supplier {
        status: SupplierStatus::Blocked,
        ..supplier()
    };
    assert_eq!(
        resolver().resolve(&blocked),
        EffectiveStatus::Stored(SupplierStatus::Blocked)
    );
}

#[test]
fn task_due_in_three_days_is_due_soon() {
    assert_eq!(resolver().resolve(&task()), EffectiveStatus::DueSoon);
}

#[test]
fn toggling_a_task_returns_a_new_value() {
    let open = task();
    let done = open.toggled();

    assert_eq!(open.status, TaskStatus::InProgress);
    assert_eq!(done.status, TaskStatus::Completed);
    assert_eq!(done.toggled().status, TaskStatus::Todo);
}

#[test]
fn material_total_cost_is_derived() {
    assert_eq!(material().total_cost(), Decimal::from(1020));
    assert_eq!(
        material().get_value("total_cost"),
        Some(Value::Decimal(Decimal::from(1020)))
    );
}

#[test]
fn invoice_outstanding_excludes_payments() {
    assert_eq!(invoice().outstanding(), Decimal::from(1000));
}

#[test]
fn invoice_deserializes_from_json() {
    let json = r#"{
        "id": "inv-9",
        "number": "NF-9",
        "customer": "Beta Ltda",
        "tax_id": "00.000.000/0001-00",
        "amount": "250.00",
        "issue_date": "2024-01-01",
        "due_date": "2024-01-31",
        "status": "pending"
    }"#;

    let invoice: Invoice = serde_json::from_str(json).unwrap();

    assert_eq!(invoice.paid_amount, Decimal::ZERO);
    assert_eq!(invoice.due_date, date(2024, 1, 31));
    assert_eq!(invoice.status, InvoiceStatus::Pending);
}
