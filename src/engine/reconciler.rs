// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Expense, LineItem};
use crate::session::Session;
use crate::store::Collection;
use rust_decimal::Decimal;

/// Keeps an expense's item list a safely-editable decomposition of its
/// total. Item edits run inside a store transaction against the expense
/// document, so two edits to the same expense can never overwrite each
/// other: the second always observes the first's committed list.

/// Unstored remainder: `amount - sum(items)`. Positive = under-itemized,
/// negative = over-itemized; both are legal states.
pub fn remaining(expense: &Expense) -> Decimal {
    let itemized: Decimal = expense.items.iter().map(|i| i.amount).sum();
    expense.amount - itemized
}

/// Within one cent of zero counts as fully itemized.
pub fn is_fully_itemized(expense: &Expense) -> bool {
    remaining(expense).abs() < Decimal::new(1, 2)
}

/// Append a line item. Validation happens before any store call; the
/// append itself is atomic and fails with NotFound if the expense no
/// longer exists at commit time.
pub fn add_item(
    session: &mut Session,
    expense_id: i64,
    name: &str,
    amount: Decimal,
) -> LedgerResult<Expense> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::validation("Item name cannot be empty"));
    }
    session.store_mut().with_txn(|txn| {
        let mut doc = txn.get::<Expense>(Collection::Expenses, expense_id)?;
        doc.data.items.push(LineItem {
            name: name.to_string(),
            amount,
        });
        txn.update(Collection::Expenses, doc.id, &doc.data)?;
        Ok(doc.data)
    })
}

/// Remove the item at `index` of the current server-side list. The index
/// is validated against the freshly read list inside the transaction, so
/// a stale client index on a concurrently-shrunk list is rejected instead
/// of removing the wrong entry.
pub fn remove_item(session: &mut Session, expense_id: i64, index: usize) -> LedgerResult<Expense> {
    session.store_mut().with_txn(|txn| {
        let mut doc = txn.get::<Expense>(Collection::Expenses, expense_id)?;
        if index >= doc.data.items.len() {
            return Err(LedgerError::validation(format!(
                "Item index {} out of range (expense has {} items)",
                index,
                doc.data.items.len()
            )));
        }
        doc.data.items.remove(index);
        txn.update(Collection::Expenses, doc.id, &doc.data)?;
        Ok(doc.data)
    })
}
