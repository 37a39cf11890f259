// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;

/// Named collections of the per-user document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Collection {
    Income,
    Expenses,
    Subscriptions,
    Budgets,
    PaymentMethods,
    Categories,
    People,
    PointRules,
    GroceryItems,
    ShoppingLists,
}

impl Collection {
    pub const ALL: [Collection; 10] = [
        Collection::Income,
        Collection::Expenses,
        Collection::Subscriptions,
        Collection::Budgets,
        Collection::PaymentMethods,
        Collection::Categories,
        Collection::People,
        Collection::PointRules,
        Collection::GroceryItems,
        Collection::ShoppingLists,
    ];

    fn table(self) -> &'static str {
        match self {
            Collection::Income => "income",
            Collection::Expenses => "expenses",
            Collection::Subscriptions => "subscriptions",
            Collection::Budgets => "budgets",
            Collection::PaymentMethods => "payment_methods",
            Collection::Categories => "categories",
            Collection::People => "people",
            Collection::PointRules => "point_rules",
            Collection::GroceryItems => "grocery_items",
            Collection::ShoppingLists => "shopping_lists",
        }
    }

    /// Interchange name, also the key used in JSON backups.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Income => "income",
            Collection::Expenses => "expenses",
            Collection::Subscriptions => "subscriptions",
            Collection::Budgets => "budgets",
            Collection::PaymentMethods => "paymentMethods",
            Collection::Categories => "categories",
            Collection::People => "people",
            Collection::PointRules => "pointRules",
            Collection::GroceryItems => "groceryItems",
            Collection::ShoppingLists => "shoppingLists",
        }
    }

    pub fn from_name(name: &str) -> Option<Collection> {
        Collection::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored record with its store-assigned id.
#[derive(Debug, Clone)]
pub struct Document<T> {
    pub id: i64,
    pub data: T,
}

type WatchFn = Box<dyn FnMut(&[Document<Value>])>;

struct Watcher {
    token: u64,
    collection: Collection,
    callback: WatchFn,
}

/// Document store over SQLite. Single-threaded; every mutation notifies
/// collection subscribers with the full current contents after commit.
/// Subscriber callbacks receive data only and must not call back into the
/// store.
pub struct Store {
    conn: Connection,
    watchers: RefCell<Vec<Watcher>>,
    next_token: Cell<u64>,
}

impl Store {
    pub fn new(conn: Connection) -> Store {
        Store {
            conn,
            watchers: RefCell::new(Vec::new()),
            next_token: Cell::new(1),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, c: Collection, id: i64) -> LedgerResult<Document<T>> {
        fetch_doc(&self.conn, c, id)
    }

    pub fn list<T: DeserializeOwned>(&self, c: Collection) -> LedgerResult<Vec<Document<T>>> {
        fetch_all(&self.conn, c)
    }

    pub fn list_raw(&self, c: Collection) -> LedgerResult<Vec<Document<Value>>> {
        fetch_all(&self.conn, c)
    }

    pub fn create<T: Serialize>(&mut self, c: Collection, data: &T) -> LedgerResult<i64> {
        let id = insert_doc(&self.conn, c, data)?;
        self.notify_one(c)?;
        Ok(id)
    }

    pub fn update<T: Serialize>(&mut self, c: Collection, id: i64, data: &T) -> LedgerResult<()> {
        update_doc(&self.conn, c, id, data)?;
        self.notify_one(c)
    }

    pub fn delete(&mut self, c: Collection, id: i64) -> LedgerResult<()> {
        delete_doc(&self.conn, c, id)?;
        self.notify_one(c)
    }

    /// Run `f` inside a single IMMEDIATE transaction. Reads performed through
    /// the handle observe the current committed state; all writes commit
    /// together or not at all. Busy commits are retried, then surfaced as
    /// Conflict.
    pub fn with_txn<T, F>(&mut self, mut f: F) -> LedgerResult<T>
    where
        F: FnMut(&TxnHandle<'_>) -> LedgerResult<T>,
    {
        const MAX_ATTEMPTS: u32 = 3;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_txn(&mut f) {
                Err(LedgerError::Conflict(_)) if attempt < MAX_ATTEMPTS => continue,
                other => return other,
            }
        }
    }

    fn try_txn<T, F>(&mut self, f: &mut F) -> LedgerResult<T>
    where
        F: FnMut(&TxnHandle<'_>) -> LedgerResult<T>,
    {
        let touched = RefCell::new(BTreeSet::new());
        let value = {
            let txn = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;
            let handle = TxnHandle {
                txn: &txn,
                touched: &touched,
            };
            let value = f(&handle)?;
            txn.commit()?;
            value
        };
        self.notify(&touched.into_inner())?;
        Ok(value)
    }

    /// Apply every operation atomically; if any fails, none are applied.
    pub fn apply_batch(&mut self, ops: &[BatchOp]) -> LedgerResult<()> {
        self.with_txn(|txn| {
            for op in ops {
                match op {
                    BatchOp::Create(c, v) => {
                        txn.create(*c, v)?;
                    }
                    BatchOp::Update(c, id, v) => txn.update(*c, *id, v)?,
                    BatchOp::Delete(c, id) => txn.delete(*c, *id)?,
                    BatchOp::Clear(c) => txn.clear(*c)?,
                }
            }
            Ok(())
        })
    }

    pub fn subscribe<F>(&self, c: Collection, callback: F) -> u64
    where
        F: FnMut(&[Document<Value>]) + 'static,
    {
        let token = self.next_token.get();
        self.next_token.set(token + 1);
        self.watchers.borrow_mut().push(Watcher {
            token,
            collection: c,
            callback: Box::new(callback),
        });
        token
    }

    pub fn unsubscribe(&self, token: u64) {
        self.watchers.borrow_mut().retain(|w| w.token != token);
    }

    pub fn clear_watchers(&self) {
        self.watchers.borrow_mut().clear();
    }

    fn notify_one(&self, c: Collection) -> LedgerResult<()> {
        let mut touched = BTreeSet::new();
        touched.insert(c);
        self.notify(&touched)
    }

    fn notify(&self, touched: &BTreeSet<Collection>) -> LedgerResult<()> {
        for &c in touched {
            let has_watchers = self
                .watchers
                .borrow()
                .iter()
                .any(|w| w.collection == c);
            if !has_watchers {
                continue;
            }
            let docs = self.list_raw(c)?;
            for watcher in self
                .watchers
                .borrow_mut()
                .iter_mut()
                .filter(|w| w.collection == c)
            {
                (watcher.callback)(&docs);
            }
        }
        Ok(())
    }
}

/// A batched write; applied all-or-nothing by [`Store::apply_batch`].
pub enum BatchOp {
    Create(Collection, Value),
    Update(Collection, i64, Value),
    Delete(Collection, i64),
    Clear(Collection),
}

/// Transactional view handed to `with_txn` closures. Writes are recorded so
/// subscribers of the touched collections can be notified after commit.
pub struct TxnHandle<'a> {
    txn: &'a rusqlite::Transaction<'a>,
    touched: &'a RefCell<BTreeSet<Collection>>,
}

impl TxnHandle<'_> {
    pub fn get<T: DeserializeOwned>(&self, c: Collection, id: i64) -> LedgerResult<Document<T>> {
        fetch_doc(self.txn, c, id)
    }

    pub fn list<T: DeserializeOwned>(&self, c: Collection) -> LedgerResult<Vec<Document<T>>> {
        fetch_all(self.txn, c)
    }

    pub fn create<T: Serialize>(&self, c: Collection, data: &T) -> LedgerResult<i64> {
        let id = insert_doc(self.txn, c, data)?;
        self.touched.borrow_mut().insert(c);
        Ok(id)
    }

    pub fn update<T: Serialize>(&self, c: Collection, id: i64, data: &T) -> LedgerResult<()> {
        update_doc(self.txn, c, id, data)?;
        self.touched.borrow_mut().insert(c);
        Ok(())
    }

    pub fn delete(&self, c: Collection, id: i64) -> LedgerResult<()> {
        delete_doc(self.txn, c, id)?;
        self.touched.borrow_mut().insert(c);
        Ok(())
    }

    pub fn clear(&self, c: Collection) -> LedgerResult<()> {
        self.txn
            .execute(&format!("DELETE FROM {}", c.table()), [])?;
        self.touched.borrow_mut().insert(c);
        Ok(())
    }
}

fn fetch_doc<T: DeserializeOwned>(
    conn: &Connection,
    c: Collection,
    id: i64,
) -> LedgerResult<Document<T>> {
    let body: Option<String> = conn
        .query_row(
            &format!("SELECT body FROM {} WHERE id=?1", c.table()),
            params![id],
            |r| r.get(0),
        )
        .optional()?;
    let body = body.ok_or_else(|| LedgerError::not_found(c.name(), id))?;
    Ok(Document {
        id,
        data: serde_json::from_str(&body)?,
    })
}

fn fetch_all<T: DeserializeOwned>(conn: &Connection, c: Collection) -> LedgerResult<Vec<Document<T>>> {
    let mut stmt = conn.prepare(&format!("SELECT id, body FROM {} ORDER BY id", c.table()))?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)))?;
    let mut docs = Vec::new();
    for row in rows {
        let (id, body) = row?;
        docs.push(Document {
            id,
            data: serde_json::from_str(&body)?,
        });
    }
    Ok(docs)
}

fn insert_doc<T: Serialize>(conn: &Connection, c: Collection, data: &T) -> LedgerResult<i64> {
    let body = serde_json::to_string(data)?;
    conn.execute(
        &format!("INSERT INTO {}(body) VALUES (?1)", c.table()),
        params![body],
    )?;
    Ok(conn.last_insert_rowid())
}

fn update_doc<T: Serialize>(
    conn: &Connection,
    c: Collection,
    id: i64,
    data: &T,
) -> LedgerResult<()> {
    let body = serde_json::to_string(data)?;
    let n = conn.execute(
        &format!("UPDATE {} SET body=?1 WHERE id=?2", c.table()),
        params![body, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(c.name(), id));
    }
    Ok(())
}

fn delete_doc(conn: &Connection, c: Collection, id: i64) -> LedgerResult<()> {
    let n = conn.execute(
        &format!("DELETE FROM {} WHERE id=?1", c.table()),
        params![id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(c.name(), id));
    }
    Ok(())
}
