// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use homeledger::error::LedgerError;
use homeledger::models::GroceryItem;
use homeledger::store::{BatchOp, Collection, Store};
use rusqlite::Connection;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn setup() -> Store {
    let mut conn = Connection::open_in_memory().unwrap();
    homeledger::db::init_schema(&mut conn).unwrap();
    Store::new(conn)
}

fn item(name: &str) -> GroceryItem {
    GroceryItem { name: name.into() }
}

#[test]
fn crud_round_trip() {
    let mut store = setup();
    let id = store.create(Collection::GroceryItems, &item("Milk")).unwrap();

    let doc = store
        .get::<GroceryItem>(Collection::GroceryItems, id)
        .unwrap();
    assert_eq!(doc.data.name, "Milk");

    store
        .update(Collection::GroceryItems, id, &item("Oat milk"))
        .unwrap();
    let doc = store
        .get::<GroceryItem>(Collection::GroceryItems, id)
        .unwrap();
    assert_eq!(doc.data.name, "Oat milk");

    store.delete(Collection::GroceryItems, id).unwrap();
    let err = store
        .get::<GroceryItem>(Collection::GroceryItems, id)
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
}

#[test]
fn update_and_delete_missing_are_not_found() {
    let mut store = setup();
    let err = store
        .update(Collection::GroceryItems, 5, &item("x"))
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
    let err = store.delete(Collection::GroceryItems, 5).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
}

#[test]
fn ids_are_never_reused() {
    let mut store = setup();
    let first = store.create(Collection::GroceryItems, &item("a")).unwrap();
    store.delete(Collection::GroceryItems, first).unwrap();
    let second = store.create(Collection::GroceryItems, &item("b")).unwrap();
    assert!(second > first);
}

#[test]
fn subscribers_see_full_contents_after_each_mutation() {
    let mut store = setup();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(Collection::GroceryItems, move |docs| {
        sink.borrow_mut().push(docs.len());
    });

    let id = store.create(Collection::GroceryItems, &item("Milk")).unwrap();
    store.create(Collection::GroceryItems, &item("Eggs")).unwrap();
    store.delete(Collection::GroceryItems, id).unwrap();

    assert_eq!(*seen.borrow(), vec![1, 2, 1]);
}

#[test]
fn unsubscribed_watchers_stop_receiving() {
    let mut store = setup();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let token = store.subscribe(Collection::GroceryItems, move |docs| {
        sink.borrow_mut().push(docs.len());
    });

    store.create(Collection::GroceryItems, &item("Milk")).unwrap();
    store.unsubscribe(token);
    store.create(Collection::GroceryItems, &item("Eggs")).unwrap();

    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn watchers_only_fire_for_their_collection() {
    let mut store = setup();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(Collection::People, move |docs| {
        sink.borrow_mut().push(docs.len());
    });

    store.create(Collection::GroceryItems, &item("Milk")).unwrap();
    assert!(seen.borrow().is_empty());
}

#[test]
fn txn_commits_all_writes_together() {
    let mut store = setup();
    store
        .with_txn(|txn| {
            txn.create(Collection::GroceryItems, &item("a"))?;
            txn.create(Collection::GroceryItems, &item("b"))?;
            Ok(())
        })
        .unwrap();
    let docs = store
        .list::<GroceryItem>(Collection::GroceryItems)
        .unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn failed_txn_applies_nothing() {
    let mut store = setup();
    let result: Result<(), _> = store.with_txn(|txn| {
        txn.create(Collection::GroceryItems, &item("a"))?;
        Err(LedgerError::validation("boom"))
    });
    assert!(result.is_err());
    let docs = store
        .list::<GroceryItem>(Collection::GroceryItems)
        .unwrap();
    assert!(docs.is_empty());
}

#[test]
fn batch_is_all_or_nothing() {
    let mut store = setup();
    let ops = vec![
        BatchOp::Create(Collection::GroceryItems, json!({"name": "Milk"})),
        BatchOp::Update(Collection::GroceryItems, 99, json!({"name": "Ghost"})),
    ];
    let err = store.apply_batch(&ops).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { .. }));
    let docs = store
        .list::<GroceryItem>(Collection::GroceryItems)
        .unwrap();
    assert!(docs.is_empty());
}

#[test]
fn batch_clear_then_insert_replaces_contents() {
    let mut store = setup();
    store.create(Collection::GroceryItems, &item("old")).unwrap();
    let ops = vec![
        BatchOp::Clear(Collection::GroceryItems),
        BatchOp::Create(Collection::GroceryItems, json!({"name": "new"})),
    ];
    store.apply_batch(&ops).unwrap();
    let docs = store
        .list::<GroceryItem>(Collection::GroceryItems)
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].data.name, "new");
}

#[test]
fn txn_notifies_touched_collections_once_after_commit() {
    let mut store = setup();
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(Collection::GroceryItems, move |docs| {
        sink.borrow_mut().push(docs.len());
    });

    store
        .with_txn(|txn| {
            txn.create(Collection::GroceryItems, &item("a"))?;
            txn.create(Collection::GroceryItems, &item("b"))?;
            Ok(())
        })
        .unwrap();

    // One notification with the committed contents, not one per write.
    assert_eq!(*seen.borrow(), vec![2]);
}
