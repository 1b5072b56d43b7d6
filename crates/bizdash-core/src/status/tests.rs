use crate::{
    clock::FixedClock,
    status::{EffectiveStatus, StatusPolicy, StatusResolver, resolve_status},
    test_support::{BILL_MODEL, Bill, BillState, date},
};
use proptest::prelude::*;

fn resolver_at(y: i32, m: u8, d: u8) -> StatusResolver<FixedClock> {
    StatusResolver::new(FixedClock::at_date(date(y, m, d)))
}

#[test]
fn past_due_open_record_is_overdue() {
    let bill = Bill::new("A", 100, Some(date(2024, 1, 1)), BillState::Pending);

    assert_eq!(
        resolver_at(2024, 3, 1).resolve(&bill),
        EffectiveStatus::Overdue
    );
}

#[test]
fn terminal_status_ignores_dates() {
    let bill = Bill::new("B", 50, Some(date(2024, 1, 1)), BillState::Paid);

    assert_eq!(
        resolver_at(2024, 3, 1).resolve(&bill),
        EffectiveStatus::Stored(BillState::Paid)
    );
}

#[test]
fn due_today_is_due_soon_not_overdue() {
    let bill = Bill::new("A", 100, Some(date(2024, 3, 1)), BillState::Pending);

    assert_eq!(
        resolver_at(2024, 3, 1).resolve(&bill),
        EffectiveStatus::DueSoon
    );
}

#[test]
fn due_soon_window_is_inclusive() {
    let edge = Bill::new("A", 100, Some(date(2024, 3, 8)), BillState::Pending);
    let beyond = Bill::new("B", 100, Some(date(2024, 3, 9)), BillState::Pending);
    let resolver = resolver_at(2024, 3, 1);

    assert_eq!(resolver.resolve(&edge), EffectiveStatus::DueSoon);
    assert_eq!(
        resolver.resolve(&beyond),
        EffectiveStatus::Stored(BillState::Pending)
    );
}

#[test]
fn zero_window_only_flags_today() {
    let resolver = StatusResolver::with_policy(
        FixedClock::at_date(date(2024, 3, 1)),
        StatusPolicy::new(0),
    );
    let today = Bill::new("A", 1, Some(date(2024, 3, 1)), BillState::Pending);
    let tomorrow = Bill::new("B", 1, Some(date(2024, 3, 2)), BillState::Pending);

    assert_eq!(resolver.resolve(&today), EffectiveStatus::DueSoon);
    assert_eq!(
        resolver.resolve(&tomorrow),
        EffectiveStatus::Stored(BillState::Pending)
    );
}

#[test]
fn missing_date_passes_stored_status_through() {
    let bill = Bill::new("A", 100, None, BillState::Pending);

    assert_eq!(
        resolver_at(2024, 3, 1).resolve(&bill),
        EffectiveStatus::Stored(BillState::Pending)
    );
}

#[test]
fn past_due_draft_is_overdue() {
    let draft = Bill::new("A", 100, Some(date(2024, 1, 1)), BillState::Draft);

    assert_eq!(
        resolver_at(2024, 3, 1).resolve(&draft),
        EffectiveStatus::Overdue
    );
}

#[test]
fn resolving_does_not_touch_the_record() {
    let bill = Bill::new("A", 100, Some(date(2024, 1, 1)), BillState::Pending);
    let before = bill.clone();
    let _ = resolver_at(2024, 3, 1).resolve(&bill);

    assert_eq!(bill, before);
}

#[test]
fn labels_use_model_vocabulary() {
    assert_eq!(EffectiveStatus::<BillState>::Overdue.label(&BILL_MODEL), "overdue");
    assert_eq!(EffectiveStatus::<BillState>::DueSoon.label(&BILL_MODEL), "due_soon");
    assert_eq!(
        EffectiveStatus::Stored(BillState::Cancelled).label(&BILL_MODEL),
        "cancelled"
    );
}

fn arb_state() -> impl Strategy<Value = BillState> {
    prop_oneof![
        Just(BillState::Draft),
        Just(BillState::Pending),
        Just(BillState::Paid),
        Just(BillState::Cancelled),
    ]
}

proptest! {
    #[test]
    fn terminal_status_is_stable_under_any_clock(
        state in arb_state(),
        due_offset in -1000i64..1000,
        first_offset in -1000i64..1000,
        second_offset in -1000i64..1000,
    ) {
        let anchor = date(2024, 3, 1);
        let due = Some(anchor.saturating_add_days(due_offset));
        let policy = StatusPolicy::default();

        let first = resolve_status(state, due, anchor.saturating_add_days(first_offset), policy);
        if first.is_terminal() {
            let second = resolve_status(state, due, anchor.saturating_add_days(second_offset), policy);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn resolution_is_deterministic(
        state in arb_state(),
        due_offset in -100i64..100,
    ) {
        let today = date(2024, 3, 1);
        let due = Some(today.saturating_add_days(due_offset));
        let policy = StatusPolicy::default();

        prop_assert_eq!(
            resolve_status(state, due, today, policy),
            resolve_status(state, due, today, policy)
        );
    }
}
