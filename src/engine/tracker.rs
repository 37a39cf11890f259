// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerResult;
use crate::models::{Budget, PayType};
use crate::session::Session;
use crate::store::Collection;
use chrono::{Datelike, NaiveDate};

/// Paid-state tracking for recurring budgets: manual toggles and the
/// idempotent auto-pay sweep. Both mutate `paidMonths` only inside an
/// atomic read-modify-write, so concurrent toggles never lose updates.

pub fn is_paid(budget: &Budget, period: &str) -> bool {
    budget.paid_months.contains(period)
}

/// Flip the paid state of one budget for `period`. Returns the new state
/// (true = now paid). The budget is re-read inside the transaction, so a
/// racing toggle is observed rather than overwritten.
pub fn toggle(session: &mut Session, budget_id: i64, period: &str) -> LedgerResult<bool> {
    session.store_mut().with_txn(|txn| {
        let mut doc = txn.get::<Budget>(Collection::Budgets, budget_id)?;
        let now_paid = if doc.data.paid_months.contains(period) {
            doc.data.paid_months.remove(period);
            false
        } else {
            doc.data.paid_months.insert(period.to_string());
            true
        };
        txn.update(Collection::Budgets, doc.id, &doc.data)?;
        Ok(now_paid)
    })
}

/// True when the sweep should mark this budget paid today. The due-day
/// comparison is a literal day number: dueDay 31 in a 30-day month never
/// matches that month.
pub fn due_for_auto_pay(budget: &Budget, today: NaiveDate, period: &str) -> bool {
    if budget.pay_type != PayType::Auto {
        return false;
    }
    match budget.due_day {
        Some(due_day) => today.day() >= due_day && !budget.paid_months.contains(period),
        None => false,
    }
}

/// Mark every due Auto budget paid for the current period, in one
/// all-or-nothing batch. Returns how many budgets were marked. Safe to
/// re-run: already-paid periods are skipped, so a second run on the same
/// day changes nothing.
pub fn run_auto_pay_sweep(session: &mut Session) -> LedgerResult<usize> {
    let today = session.today();
    let period = session.period();
    session.store_mut().with_txn(|txn| {
        let mut marked = 0;
        for mut doc in txn.list::<Budget>(Collection::Budgets)? {
            if due_for_auto_pay(&doc.data, today, &period) {
                doc.data.paid_months.insert(period.clone());
                txn.update(Collection::Budgets, doc.id, &doc.data)?;
                marked += 1;
            }
        }
        Ok(marked)
    })
}
