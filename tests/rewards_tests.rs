// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use homeledger::engine::rewards;
use homeledger::models::{Expense, PointRule};
use homeledger::store::Document;

fn expense(category: &str, subcategory: &str, card: &str, amount: &str) -> Document<Expense> {
    Document {
        id: 1,
        data: Expense {
            payee: "Shop".into(),
            category: category.into(),
            subcategory: subcategory.into(),
            payment_type: card.into(),
            amount: amount.parse().unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            notes: String::new(),
            items: Vec::new(),
        },
    }
}

fn rule(category: &str, subcategory: &str, card: &str, multiplier: &str) -> Document<PointRule> {
    Document {
        id: 1,
        data: PointRule {
            category: category.into(),
            subcategory: subcategory.into(),
            card: card.into(),
            multiplier: multiplier.parse().unwrap(),
        },
    }
}

#[test]
fn points_floor_to_whole_numbers() {
    let rules = vec![rule("Food", "Dining", "Sapphire", "3")];
    let e = expense("Food", "Dining", "Sapphire", "33.50");
    let (card, points) = rewards::points_for(&e.data, &rules).unwrap();
    assert_eq!(card, "Sapphire");
    assert_eq!(points, 100); // floor(33.50 * 3) = floor(100.5)
}

#[test]
fn rule_matching_is_exact_on_all_three_fields() {
    let rules = vec![rule("Food", "Dining", "Sapphire", "3")];
    assert!(rewards::points_for(&expense("Food", "Dining", "Freedom", "10").data, &rules).is_none());
    assert!(rewards::points_for(&expense("Food", "Groceries", "Sapphire", "10").data, &rules).is_none());
    assert!(rewards::points_for(&expense("Travel", "Dining", "Sapphire", "10").data, &rules).is_none());
}

#[test]
fn duplicate_rules_first_stored_wins() {
    let rules = vec![
        rule("Food", "Dining", "Sapphire", "3"),
        rule("Food", "Dining", "Sapphire", "5"),
    ];
    let (_, points) = rewards::points_for(&expense("Food", "Dining", "Sapphire", "10").data, &rules)
        .unwrap();
    assert_eq!(points, 30);
}

#[test]
fn points_accumulate_per_card() {
    let rules = vec![
        rule("Food", "Dining", "Sapphire", "3"),
        rule("Food", "Groceries", "Freedom", "1.5"),
    ];
    let expenses = vec![
        expense("Food", "Dining", "Sapphire", "20.00"),
        expense("Food", "Dining", "Sapphire", "10.00"),
        expense("Food", "Groceries", "Freedom", "41.00"),
        expense("Travel", "Flights", "Sapphire", "500.00"), // no rule
    ];
    let by_card = rewards::points_by_card(&expenses, &rules);
    assert_eq!(by_card.len(), 2);
    assert_eq!(by_card["Sapphire"], 90);
    assert_eq!(by_card["Freedom"], 61); // floor(61.5)
}
