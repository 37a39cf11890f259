// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{Collection, Document, Store};
use crate::utils::period_key;
use chrono::{Local, NaiveDate};
use serde_json::Value;

/// Explicit per-invocation context: the store, the reference date for
/// period math, and every live change-feed subscription. Closing the
/// session disposes all subscriptions.
pub struct Session {
    store: Store,
    today: NaiveDate,
    subscriptions: Vec<u64>,
}

impl Session {
    pub fn open(conn: rusqlite::Connection) -> Session {
        Session::open_at(conn, Local::now().date_naive())
    }

    /// Open with an explicit "today", used by `--as-of` and by tests.
    pub fn open_at(conn: rusqlite::Connection, today: NaiveDate) -> Session {
        Session {
            store: Store::new(conn),
            today,
            subscriptions: Vec::new(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// "YYYY-MM" key of the current calendar period.
    pub fn period(&self) -> String {
        period_key(self.today)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Subscribe to a collection's change feed for the life of the session.
    pub fn watch<F>(&mut self, c: Collection, callback: F) -> u64
    where
        F: FnMut(&[Document<Value>]) + 'static,
    {
        let token = self.store.subscribe(c, callback);
        self.subscriptions.push(token);
        token
    }

    pub fn unwatch(&mut self, token: u64) {
        self.subscriptions.retain(|t| *t != token);
        self.store.unsubscribe(token);
    }

    pub fn close(mut self) {
        for token in self.subscriptions.drain(..) {
            self.store.unsubscribe(token);
        }
    }
}
