use dictlite::persistence::{DocStoreError, DocumentStore, Order, Predicate, Value};
use serde_json::json;

use super::{
    _copy_change, _record, _row1, _row2, _store_and_compare, _update1, SILLY_COLUMN_NAMES,
};

fn _good_where() -> Predicate {
    Predicate::new("col1", "==", "data1")
}

fn _bad_where() -> Predicate {
    Predicate::new("col1", "==", "bogus")
}

fn _sort_fixture(store: &mut DocumentStore) -> Vec<dictlite::persistence::Record> {
    let rows = vec![
        _record(json!({"a": 0, "b": "y"})),
        _record(json!({"a": 2, "b": "x"})),
        _record(json!({"a": 20917203912_i64, "b": "z"})),
    ];
    for row in rows.iter() {
        store.store(row).unwrap();
    }
    rows
}

#[test]
fn basic_good_sorts() {
    let mut store = DocumentStore::memory().unwrap();
    let rows = _sort_fixture(&mut store);
    let (a, b, c) = (rows[0].clone(), rows[1].clone(), rows[2].clone());

    assert_eq!(store.get_all().unwrap(), vec![a.clone(), b.clone(), c.clone()]);
    assert_eq!(
        store.get(None, &Order::by("b")).unwrap(),
        vec![b.clone(), a.clone(), c.clone()]
    );
    assert_eq!(
        store.get(None, &Order::Natural).unwrap(),
        vec![a.clone(), b.clone(), c.clone()]
    );
    assert_eq!(
        store.get(None, &Order::keys([("b", "DESC")]).unwrap()).unwrap(),
        vec![c.clone(), a.clone(), b.clone()]
    );
    assert_eq!(
        store.get(None, &Order::keys([("a", "ASC")]).unwrap()).unwrap(),
        vec![a.clone(), b.clone(), c.clone()]
    );
    assert_eq!(
        store.get(None, &Order::keys([("a", "DESC")]).unwrap()).unwrap(),
        vec![c, b, a]
    );
}

#[test]
fn sort_ties_fall_back_to_listed_keys_then_insertion() {
    let mut store = DocumentStore::memory().unwrap();
    let first = _record(json!({"group": "g1", "n": "2"}));
    let second = _record(json!({"group": "g1", "n": "1"}));
    let third = _record(json!({"group": "g0", "n": "2"}));
    let fourth = _record(json!({"group": "g1", "n": "2"}));
    for row in [&first, &second, &third, &fourth] {
        store.store(row).unwrap();
    }

    let order = Order::keys([("group", "DESC"), ("n", "ASC")]).unwrap();
    let records = store.get(None, &order).unwrap();

    assert_eq!(records, vec![second, first, fourth, third]);
}

#[test]
fn sort_by_unknown_key_keeps_insertion_order() {
    let mut store = DocumentStore::memory().unwrap();
    let rows = _sort_fixture(&mut store);

    assert_eq!(store.get(None, &Order::by("nope")).unwrap(), rows);
}

#[test]
fn numbers_sort_and_compare_as_stored_text() {
    let mut store = DocumentStore::memory().unwrap();
    let (nine, ten, minus_one) = (
        _record(json!({"n": 9})),
        _record(json!({"n": 10})),
        _record(json!({"n": -1})),
    );
    for row in [&nine, &ten, &minus_one] {
        store.store(row).unwrap();
    }

    // "-1" < "10" < "9" byte-wise.
    assert_eq!(
        store.get(None, &Order::by("n")).unwrap(),
        vec![minus_one.clone(), ten.clone(), nine.clone()]
    );
    assert_eq!(
        store.get(Some(&Predicate::new("n", ">", 2)), &Order::Natural).unwrap(),
        vec![nine]
    );
}

#[test]
fn get_with_predicate() {
    let mut store = DocumentStore::memory().unwrap();
    let rows = _sort_fixture(&mut store);

    let records = store
        .get(Some(&Predicate::new("a", ">", 0)), &Order::Natural)
        .unwrap();
    assert_eq!(records, vec![rows[1].clone(), rows[2].clone()]);

    let records = store
        .get(Some(&Predicate::new("b", "!=", "x")), &Order::by("b"))
        .unwrap();
    assert_eq!(records, vec![rows[0].clone(), rows[2].clone()]);
}

#[test]
fn get_with_predicate_on_unknown_key_matches_nothing() {
    let mut store = DocumentStore::memory().unwrap();
    _sort_fixture(&mut store);

    let records = store
        .get(Some(&Predicate::new("missing", "==", 0)), &Order::Natural)
        .unwrap();

    assert!(records.is_empty());
}

#[test]
fn basic_delete() {
    let mut store = DocumentStore::memory().unwrap();
    let rows = _sort_fixture(&mut store);

    assert_eq!(store.get_all().unwrap().len(), 3);

    let deleted = store.delete(Some(&Predicate::new("a", "==", 0))).unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(store.get_all().unwrap(), rows[1..].to_vec());

    let deleted = store.delete(None).unwrap();
    assert_eq!(deleted, 2);
    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn delete_from_empty_table() {
    let mut store = DocumentStore::memory().unwrap();

    assert_eq!(store.delete(None).unwrap(), 0);
    assert_eq!(store.delete(Some(&_bad_where())).unwrap(), 0);
    assert!(store.is_empty().unwrap());
}

#[test]
fn multiple_rows_same_columns() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();
    store.store(&_row1()).unwrap();

    assert_eq!(store.get_all().unwrap(), vec![_row1(), _row1()]);
}

#[test]
fn getting_rows_using_raw_values() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();
    store.store(&_row2()).unwrap();

    let records = store
        .get(
            Some(&Predicate::new("col1", "==", Value::raw("\"data1\""))),
            &Order::Natural,
        )
        .unwrap();

    assert_eq!(records, vec![_row1()]);
}

#[test]
fn raw_value_without_encoding_does_not_match() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();

    let records = store
        .get(
            Some(&Predicate::new("col1", "==", Value::raw("data1"))),
            &Order::Natural,
        )
        .unwrap();

    assert!(records.is_empty());
}

#[test]
fn rows_with_different_columns() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();
    store.store(&_row2()).unwrap();

    let records = store.get_all().unwrap();

    assert_eq!(records, vec![_row1(), _row2()]);
    assert!(!records[0].contains_key("col3"));
    assert!(!records[1].contains_key("col1"));
}

#[test]
fn update_all_rows_with_one_entry() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();

    let updated = store.update(&_update1(), false, None).unwrap();

    assert_eq!(updated, 1);
    assert_eq!(store.get_all().unwrap(), vec![_copy_change(&_row1(), &_update1())]);
}

#[test]
fn update_all_rows_with_multiple_entries() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();
    store.store(&_row2()).unwrap();

    store.update(&_update1(), false, None).unwrap();

    assert_eq!(
        store.get_all().unwrap(),
        vec![
            _copy_change(&_row1(), &_update1()),
            _copy_change(&_row2(), &_update1()),
        ]
    );
}

#[test]
fn update_single_row() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();
    store.store(&_row2()).unwrap();

    let updated = store.update(&_update1(), false, Some(&_good_where())).unwrap();

    assert_eq!(updated, 1);
    assert_eq!(
        store.get_all().unwrap(),
        vec![_copy_change(&_row1(), &_update1()), _row2()]
    );
}

#[test]
fn update_fallback_to_insert() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();

    let written = store.update(&_update1(), true, Some(&_bad_where())).unwrap();

    assert_eq!(written, 1);
    assert_eq!(store.get_all().unwrap(), vec![_row1(), _update1()]);
}

#[test]
fn update_fallback_to_nothing() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();

    let written = store.update(&_update1(), false, Some(&_bad_where())).unwrap();

    assert_eq!(written, 0);
    assert_eq!(store.get_all().unwrap(), vec![_row1()]);
}

#[test]
fn update_empty_table() {
    let mut store = DocumentStore::memory().unwrap();

    store.update(&_update1(), false, Some(&_bad_where())).unwrap();

    assert!(store.get_all().unwrap().is_empty());
}

#[test]
fn update_empty_table_fallback_to_insert() {
    let mut store = DocumentStore::memory().unwrap();

    store.update(&_update1(), true, Some(&_bad_where())).unwrap();

    assert_eq!(store.get_all().unwrap(), vec![_update1()]);
}

#[test]
fn update_empty_table_without_predicate_falls_back() {
    let mut store = DocumentStore::memory().unwrap();

    store.update(&_update1(), true, None).unwrap();

    assert_eq!(store.get_all().unwrap(), vec![_update1()]);
}

#[test]
fn various_badnames_store_get_only() {
    for name in SILLY_COLUMN_NAMES {
        let mut record = _record(json!({"col2": "data2"}));
        record.insert(name.to_string(), Value::from("data1"));

        _store_and_compare(&record, None);
    }
}

#[test]
fn various_badname_update() {
    for name in SILLY_COLUMN_NAMES {
        let mut store = DocumentStore::memory().unwrap();
        let mut original = _record(json!({}));
        original.insert(name.to_string(), Value::from("data1"));
        let mut update = _record(json!({}));
        update.insert(name.to_string(), Value::from("UPDATED"));

        store.store(&original).unwrap();
        store.update(&update, false, None).unwrap();

        assert_eq!(store.get_all().unwrap(), vec![update], "key {:?}", name);
    }
}

#[test]
fn badname_predicates() {
    for name in SILLY_COLUMN_NAMES {
        let mut store = DocumentStore::memory().unwrap();
        let mut kept = _record(json!({}));
        kept.insert(name.to_string(), Value::from("keep"));
        let mut dropped = _record(json!({}));
        dropped.insert(name.to_string(), Value::from("drop"));
        store.store(&kept).unwrap();
        store.store(&dropped).unwrap();

        store
            .delete(Some(&Predicate::new(name, "==", "drop")))
            .unwrap();

        assert_eq!(store.get_all().unwrap(), vec![kept], "key {:?}", name);
    }
}

#[test]
fn nul_in_key_round_trips() {
    let mut store = DocumentStore::memory().unwrap();
    let mut record = _record(json!({"a^0b": "escaped"}));
    record.insert("a\0b".to_string(), Value::from("nul"));

    store.store(&record).unwrap();

    assert_eq!(store.get_all().unwrap(), vec![record.clone()]);
    assert_eq!(store.columns().unwrap(), vec!["a^0b", "a\0b"]);
    assert_eq!(
        store
            .get(Some(&Predicate::new("a\0b", "==", "nul")), &Order::Natural)
            .unwrap(),
        vec![record]
    );
}

#[test]
fn invalid_operator() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();

    let result = store.update(
        &_update1(),
        true,
        Some(&Predicate::new("thing", "\"should break\"", "value")),
    );

    match result {
        Err(DocStoreError::UnknownOperator(symbol)) => assert_eq!(symbol, "\"should break\""),
        other => panic!("expected an unknown operator error, got {:?}", other),
    }
    assert_eq!(store.get_all().unwrap(), vec![_row1()]);
    assert_eq!(store.columns().unwrap(), vec!["col1", "col2"]);
}

#[test]
fn invalid_operator_on_get_and_delete() {
    let mut store = DocumentStore::memory().unwrap();
    store.store(&_row1()).unwrap();
    let predicate = Predicate::new("col1", "; DROP TABLE x", "data1");

    assert!(matches!(
        store.get(Some(&predicate), &Order::Natural),
        Err(DocStoreError::UnknownOperator(_))
    ));
    assert!(matches!(
        store.delete(Some(&predicate)),
        Err(DocStoreError::UnknownOperator(_))
    ));
    assert_eq!(store.len().unwrap(), 1);
}
