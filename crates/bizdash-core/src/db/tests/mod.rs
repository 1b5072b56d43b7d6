
use crate::{
    clock::FixedClock,
    db::{
        RecordCollectionEngine,
        aggregate::{KpiPredicate, KpiSpec, Measure},
        query::{InvalidQueryError, OrderDirection, Query, QueryError},
    },
    obs::{MetricsEvent, MetricsSink, with_metrics_sink},
    status::{EffectiveStatus, StatusResolver},
    test_support::{Bill, BillState, date},
    types::Decimal,
};
use std::{cell::RefCell, rc::Rc};

type BillEngine = RecordCollectionEngine<Bill, FixedClock>;

fn engine_at(y: i32, m: u8, d: u8) -> BillEngine {
    RecordCollectionEngine::new(StatusResolver::new(FixedClock::at_date(date(y, m, d))))
        .with_kpis(&bill_kpis())
        .expect("bill kpis should compile")
}

fn bill_kpis() -> Vec<KpiSpec<BillState>> {
    vec![
        KpiSpec::count("count"),
        KpiSpec::sum_where(
            "overdue_amount",
            Measure::difference("amount", "paid_amount"),
            KpiPredicate::status_in([EffectiveStatus::Overdue]),
        ),
        KpiSpec::sum("total_amount", Measure::field("amount")),
    ]
}

fn three_bills() -> Vec<Bill> {
    vec![
        Bill::new("A", 100, Some(date(2024, 1, 1)), BillState::Pending),
        Bill::new("B", 50, Some(date(2024, 6, 1)), BillState::Paid),
        Bill::new("C", 200, Some(date(2024, 1, 1)), BillState::Pending),
    ]
}

fn overdue_by_amount_desc() -> Query<BillState> {
    Query::new()
        .filter(EffectiveStatus::Overdue)
        .sort_by("amount", OrderDirection::Desc)
}

#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

//
// Pipeline scenarios
//

#[test]
fn overdue_filter_sorted_by_amount_desc() {
    let result = engine_at(2024, 3, 1)
        .query(&three_bills(), &overdue_by_amount_desc())
        .unwrap();

    assert_eq!(result.ids(), vec!["C", "A"]);
    assert_eq!(result.total_filtered(), 2);
    assert_eq!(result.total_pages(), 1);
    assert_eq!(result.summary().amount("overdue_amount"), Decimal::from(300));
    assert!(
        result
            .page()
            .iter()
            .all(|row| row.status == EffectiveStatus::Overdue)
    );
}

#[test]
fn page_size_one_splits_the_filtered_set() {
    let engine = engine_at(2024, 3, 1);
    let records = three_bills();

    let first = engine
        .query(&records, &overdue_by_amount_desc().page_size(1))
        .unwrap();
    let second = engine
        .query(&records, &overdue_by_amount_desc().page_size(1).page(2))
        .unwrap();

    assert_eq!(first.total_pages(), 2);
    assert_eq!(first.ids(), vec!["C"]);
    assert_eq!(second.ids(), vec!["A"]);
    assert_eq!(second.page_number(), 2);
}

#[test]
fn search_without_matches_is_one_empty_page() {
    let result = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().search("no such customer"))
        .unwrap();

    assert!(result.page().is_empty());
    assert_eq!(result.total_filtered(), 0);
    assert_eq!(result.total_pages(), 1);
    assert_eq!(result.page_number(), 1);
    assert_eq!(result.summary().count("count"), 0);
    assert_eq!(result.summary().amount("overdue_amount"), Decimal::ZERO);
}

#[test]
fn empty_collection_is_not_an_error() {
    let result = engine_at(2024, 3, 1).query(&[], &Query::new()).unwrap();

    assert_eq!(result.total_filtered(), 0);
    assert_eq!(result.total_pages(), 1);
}

#[test]
fn empty_filter_set_admits_every_status() {
    let result = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new())
        .unwrap();

    assert_eq!(result.total_filtered(), 3);
    assert_eq!(result.summary().count("count"), 3);
    assert_eq!(result.summary().amount("total_amount"), Decimal::from(350));
}

#[test]
fn filters_accept_stored_and_derived_statuses_together() {
    let query = Query::new()
        .filter(BillState::Paid)
        .filter(EffectiveStatus::Overdue)
        .sort_by("id", OrderDirection::Asc);

    let result = engine_at(2024, 3, 1).query(&three_bills(), &query).unwrap();

    assert_eq!(result.ids(), vec!["A", "B", "C"]);
}

#[test]
fn stored_pending_filter_excludes_overdue_records() {
    let records = vec![
        Bill::new("A", 100, Some(date(2024, 1, 1)), BillState::Pending),
        Bill::new("D", 100, Some(date(2024, 12, 1)), BillState::Pending),
    ];

    let result = engine_at(2024, 3, 1)
        .query(&records, &Query::new().filter(BillState::Pending))
        .unwrap();

    assert_eq!(result.ids(), vec!["D"]);
}

#[test]
fn search_is_case_insensitive() {
    let records = vec![
        Bill::new("A", 100, None, BillState::Draft).customer("Acme Ltd"),
        Bill::new("B", 100, None, BillState::Draft).customer("Globex"),
    ];

    let result = engine_at(2024, 3, 1)
        .query(&records, &Query::new().search("aCmE"))
        .unwrap();

    assert_eq!(result.ids(), vec!["A"]);
}

#[test]
fn search_keeps_surrounding_spaces_in_the_needle() {
    let records = vec![
        Bill::new("A", 100, None, BillState::Draft).customer("Acme Ltd"),
        Bill::new("B", 100, None, BillState::Draft).customer("Acmecorp"),
    ];

    let result = engine_at(2024, 3, 1)
        .query(&records, &Query::new().search("Acme "))
        .unwrap();

    assert_eq!(result.ids(), vec!["A"]);
}

#[test]
fn whitespace_search_matches_everything() {
    let result = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().search("   "))
        .unwrap();

    assert_eq!(result.total_filtered(), 3);
}

#[test]
fn searchable_fields_can_be_overridden() {
    let records = vec![
        Bill::new("A", 100, None, BillState::Draft).tags(&["urgent"]),
        Bill::new("B", 100, None, BillState::Draft),
    ];
    let default_engine = engine_at(2024, 3, 1);
    let tag_engine = engine_at(2024, 3, 1).with_searchable(&["tags"]).unwrap();
    let query = Query::new().search("URGENT");

    assert_eq!(default_engine.query(&records, &query).unwrap().total_filtered(), 0);
    assert_eq!(tag_engine.query(&records, &query).unwrap().ids(), vec!["A"]);
}

#[test]
fn unknown_searchable_field_is_rejected() {
    let err = engine_at(2024, 3, 1)
        .with_searchable(&["nickname"])
        .err()
        .expect("unknown field should be rejected");

    assert!(matches!(err, QueryError::UnknownField { .. }));
}

#[test]
fn status_counts_cover_the_searched_set_before_filtering() {
    let result = engine_at(2024, 3, 1)
        .query(&three_bills(), &overdue_by_amount_desc())
        .unwrap();

    assert_eq!(result.status_count(EffectiveStatus::Overdue), 2);
    assert_eq!(result.status_count(BillState::Paid), 1);
    assert_eq!(result.status_count(BillState::Pending), 0);
}

#[test]
fn summary_ignores_pagination() {
    let result = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().page_size(1).page(3))
        .unwrap();

    assert_eq!(result.page().len(), 1);
    assert_eq!(result.summary().count("count"), 3);
}

//
// Sorting
//

#[test]
fn multi_key_sort_breaks_ties_left_to_right() {
    let records = vec![
        Bill::new("A", 100, None, BillState::Draft).customer("Zeta"),
        Bill::new("B", 200, None, BillState::Draft).customer("Alpha"),
        Bill::new("C", 100, None, BillState::Draft).customer("Alpha"),
    ];
    let query = Query::new()
        .sort_by("amount", OrderDirection::Asc)
        .then_by("customer", OrderDirection::Asc);

    let result = engine_at(2024, 3, 1).query(&records, &query).unwrap();

    assert_eq!(result.ids(), vec!["C", "A", "B"]);
}

#[test]
fn text_sort_is_accent_and_case_aware() {
    let records = vec![
        Bill::new("1", 1, None, BillState::Draft).customer("beta"),
        Bill::new("2", 1, None, BillState::Draft).customer("Álvaro"),
        Bill::new("3", 1, None, BillState::Draft).customer("alpha"),
    ];

    let result = engine_at(2024, 3, 1)
        .query(&records, &Query::new().sort_by("customer", OrderDirection::Asc))
        .unwrap();

    assert_eq!(result.ids(), vec!["3", "2", "1"]);
}

#[test]
fn missing_dates_sort_first_ascending() {
    let records = vec![
        Bill::new("A", 1, Some(date(2024, 5, 1)), BillState::Draft),
        Bill::new("B", 1, None, BillState::Draft),
        Bill::new("C", 1, Some(date(2024, 4, 1)), BillState::Draft),
    ];

    let result = engine_at(2024, 3, 1)
        .query(&records, &Query::new().sort_by("due_date", OrderDirection::Asc))
        .unwrap();

    assert_eq!(result.ids(), vec!["B", "C", "A"]);
}

#[test]
fn descending_sort_keeps_ties_in_input_order() {
    let records = vec![
        Bill::new("A", 100, None, BillState::Draft),
        Bill::new("B", 300, None, BillState::Draft),
        Bill::new("C", 100, None, BillState::Draft),
    ];

    let result = engine_at(2024, 3, 1)
        .query(&records, &Query::new().sort_by("amount", OrderDirection::Desc))
        .unwrap();

    assert_eq!(result.ids(), vec!["B", "A", "C"]);
}

//
// Validation
//

#[test]
fn page_below_one_is_rejected() {
    let err = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().page(0))
        .unwrap_err();

    assert_eq!(err, QueryError::InvalidQuery(InvalidQueryError::PageBelowOne));
}

#[test]
fn zero_page_size_is_rejected() {
    let err = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().page_size(0))
        .unwrap_err();

    assert_eq!(err, QueryError::InvalidQuery(InvalidQueryError::ZeroPageSize));
}

#[test]
fn unknown_sort_key_is_rejected() {
    let err = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().sort_by("balance", OrderDirection::Asc))
        .unwrap_err();

    assert_eq!(
        err,
        QueryError::UnknownSortKey {
            entity: "bill",
            field: "balance".to_string(),
        }
    );
}

#[test]
fn list_fields_are_not_orderable() {
    let err = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().sort_by("tags", OrderDirection::Asc))
        .unwrap_err();

    assert!(matches!(err, QueryError::UnorderableSortKey { .. }));
}

#[test]
fn repeated_sort_key_is_rejected() {
    let query = Query::new()
        .sort_by("amount", OrderDirection::Asc)
        .then_by("amount", OrderDirection::Desc);

    let err = engine_at(2024, 3, 1).query(&three_bills(), &query).unwrap_err();

    assert!(matches!(err, QueryError::DuplicateSortKey { .. }));
}

#[test]
fn kpi_on_unknown_field_fails_at_construction() {
    let result = RecordCollectionEngine::<Bill, _>::new(StatusResolver::new(
        FixedClock::at_date(date(2024, 3, 1)),
    ))
    .with_kpis(&[KpiSpec::sum("x", Measure::field("balance"))]);

    assert!(matches!(result, Err(QueryError::UnknownField { .. })));
}

//
// Clamping
//

#[test]
fn out_of_range_page_serves_the_last_page() {
    let result = engine_at(2024, 3, 1)
        .query(&three_bills(), &Query::new().page_size(2).page(7))
        .unwrap();

    assert_eq!(result.page_number(), 2);
    assert_eq!(result.total_pages(), 2);
    assert_eq!(result.page().len(), 1);
}

#[test]
fn shrinking_filter_clamps_a_stale_page() {
    let engine = engine_at(2024, 3, 1);
    let records = three_bills();
    let mut query = Query::new().page_size(1).page(3);

    assert_eq!(engine.query(&records, &query).unwrap().page_number(), 3);

    // a filter edit through the builder keeps the stale page
    query = query.filter(BillState::Paid);
    let result = engine.query(&records, &query).unwrap();

    assert_eq!(result.page_number(), 1);
    assert_eq!(result.ids(), vec!["B"]);
}

//
// Observability
//

#[test]
fn query_emits_lifecycle_events() {
    let sink = Rc::new(CapturingSink::default());
    let engine = engine_at(2024, 3, 1);
    let records = three_bills();

    with_metrics_sink(sink.clone(), || {
        engine
            .query(&records, &overdue_by_amount_desc().page_size(1).page(5))
            .unwrap();
    });

    let events = sink.events.borrow();
    let path = "bizdash_core::test_support::Bill";

    assert_eq!(events.first(), Some(&MetricsEvent::QueryStart { entity_path: path }));
    assert!(events.contains(&MetricsEvent::SortApplied {
        entity_path: path,
        keys: 1
    }));
    assert!(events.contains(&MetricsEvent::PageClamped {
        entity_path: path,
        requested: 5,
        served: 2,
    }));
    assert!(events.contains(&MetricsEvent::Summarized {
        entity_path: path,
        kpis: 3
    }));
    assert_eq!(
        events.last(),
        Some(&MetricsEvent::QueryFinish {
            entity_path: path,
            rows_scanned: 3,
            rows_matched: 2,
            rows_returned: 1,
        })
    );
}

#[test]
fn rejected_query_is_counted() {
    let sink = Rc::new(CapturingSink::default());
    let engine = engine_at(2024, 3, 1);

    with_metrics_sink(sink.clone(), || {
        let _ = engine.query(&three_bills(), &Query::new().page(0));
    });

    assert!(sink.events.borrow().contains(&MetricsEvent::QueryRejected {
        entity_path: "bizdash_core::test_support::Bill"
    }));
}

#[test]
fn whole_collection_summary_ignores_queries() {
    let engine = engine_at(2024, 3, 1);

    let summary = engine.summarize(&three_bills());

    assert_eq!(summary.count("count"), 3);
    assert_eq!(summary.amount("overdue_amount"), Decimal::from(300));
}
