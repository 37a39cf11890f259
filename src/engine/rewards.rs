// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Expense, PointRule};
use crate::store::Document;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

/// Estimate credit-card points for a set of expenses against the stored
/// reward rules. A rule matches only on exact (category, subcategory,
/// card = paymentType) equality; when duplicate rules exist the first in
/// stored order wins. Points truncate (floor), never round up.

pub fn points_for(expense: &Expense, rules: &[Document<PointRule>]) -> Option<(String, i64)> {
    let rule = rules.iter().find(|r| {
        r.data.category == expense.category
            && r.data.subcategory == expense.subcategory
            && r.data.card == expense.payment_type
    })?;
    let points = (expense.amount * rule.data.multiplier)
        .floor()
        .to_i64()
        .unwrap_or(0)
        .max(0);
    Some((rule.data.card.clone(), points))
}

/// Accumulated points per card; expenses without a matching rule
/// contribute nothing.
pub fn points_by_card(
    expenses: &[Document<Expense>],
    rules: &[Document<PointRule>],
) -> BTreeMap<String, i64> {
    let mut by_card = BTreeMap::new();
    for doc in expenses {
        if let Some((card, points)) = points_for(&doc.data, rules) {
            *by_card.entry(card).or_insert(0) += points;
        }
    }
    by_card
}
