// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use homeledger::engine::projector::{self, EventTag, FeedSnapshot};
use homeledger::models::{Budget, Expense, PayType, Person, Subscription, SubscriptionStatus};
use homeledger::store::Document;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(payee: &str, on: NaiveDate) -> Document<Expense> {
    Document {
        id: 1,
        data: Expense {
            payee: payee.into(),
            category: "Food".into(),
            subcategory: "Groceries".into(),
            payment_type: "Visa".into(),
            amount: "12.00".parse().unwrap(),
            date: on,
            notes: String::new(),
            items: Vec::new(),
        },
    }
}

fn subscription(name: &str, start: NaiveDate, status: SubscriptionStatus) -> Document<Subscription> {
    Document {
        id: 1,
        data: Subscription {
            name: name.into(),
            amount: "15.99".parse().unwrap(),
            start_date: start,
            payment_method: String::new(),
            status,
        },
    }
}

fn manual_budget(due_day: Option<u32>, pay_type: PayType) -> Document<Budget> {
    Document {
        id: 1,
        data: Budget {
            category: "Utilities".into(),
            subcategory: "Power".into(),
            amount: "90.00".parse().unwrap(),
            payment_method: String::new(),
            pay_type,
            due_day,
            paid_months: Default::default(),
        },
    }
}

#[test]
fn billing_rolls_forward_when_day_has_passed() {
    let sub = subscription("Stream+", date(2024, 1, 20), SubscriptionStatus::Active);
    let next = projector::next_billing_date(&sub.data, date(2025, 6, 25)).unwrap();
    assert_eq!(next, date(2025, 7, 20));
}

#[test]
fn billing_today_is_not_rolled() {
    let sub = subscription("Stream+", date(2024, 1, 20), SubscriptionStatus::Active);
    let next = projector::next_billing_date(&sub.data, date(2025, 6, 20)).unwrap();
    assert_eq!(next, date(2025, 6, 20));
}

#[test]
fn billing_day_missing_from_month_yields_nothing() {
    let sub = subscription("Rare", date(2024, 1, 31), SubscriptionStatus::Active);
    assert_eq!(projector::next_billing_date(&sub.data, date(2025, 6, 1)), None);
}

#[test]
fn feed_windows_are_seven_days_inclusive() {
    let today = date(2025, 6, 15);
    let expenses = vec![
        expense("edge-in", date(2025, 6, 8)),
        expense("edge-out", date(2025, 6, 7)),
        expense("today", today),
        expense("future", date(2025, 6, 16)),
    ];
    let snapshot = FeedSnapshot {
        expenses: &expenses,
        budgets: &[],
        subscriptions: &[],
    };
    let events = projector::recompute(&snapshot, today);
    let names: Vec<_> = events.iter().map(|e| e.description.as_str()).collect();
    assert_eq!(names, ["edge-in", "today"]);
    assert!(events.iter().all(|e| e.tag == EventTag::Recent));
}

#[test]
fn feed_tags_manual_budgets_and_subscriptions() {
    let today = date(2025, 6, 15);
    let budgets = vec![
        manual_budget(Some(18), PayType::Manual),
        manual_budget(Some(18), PayType::Auto),
        manual_budget(None, PayType::Manual),
    ];
    let subs = vec![
        subscription("Due", date(2024, 3, 20), SubscriptionStatus::Active),
        subscription("Cancelled", date(2024, 3, 20), SubscriptionStatus::Cancelled),
        subscription("TooFar", date(2024, 3, 25), SubscriptionStatus::Active),
    ];
    let snapshot = FeedSnapshot {
        expenses: &[],
        budgets: &budgets,
        subscriptions: &subs,
    };
    let events = projector::recompute(&snapshot, today);
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .any(|e| e.tag == EventTag::UpcomingManual && e.description == "Utilities / Power"));
    assert!(events
        .iter()
        .any(|e| e.tag == EventTag::Upcoming && e.description == "Due"));
}

#[test]
fn coinciding_events_are_kept_and_sorted() {
    let today = date(2025, 6, 15);
    let budgets = vec![manual_budget(Some(20), PayType::Manual)];
    let subs = vec![subscription("SameDay", date(2024, 1, 20), SubscriptionStatus::Active)];
    let expenses = vec![expense("yesterday", date(2025, 6, 14))];
    let snapshot = FeedSnapshot {
        expenses: &expenses,
        budgets: &budgets,
        subscriptions: &subs,
    };
    let events = projector::recompute(&snapshot, today);
    let dates: Vec<_> = events.iter().map(|e| e.date).collect();
    assert_eq!(dates, [date(2025, 6, 14), date(2025, 6, 20), date(2025, 6, 20)]);

    let grouped = projector::group_by_date(events);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[1].1.len(), 2);
}

#[test]
fn due_day_past_month_end_produces_no_event() {
    let today = date(2025, 6, 28);
    let budgets = vec![manual_budget(Some(31), PayType::Manual)];
    let snapshot = FeedSnapshot {
        expenses: &[],
        budgets: &budgets,
        subscriptions: &[],
    };
    assert!(projector::recompute(&snapshot, today).is_empty());
}

#[test]
fn birthdays_within_thirty_days() {
    let people = vec![
        Document {
            id: 1,
            data: Person {
                name: "Sam".into(),
                birthday: date(1990, 7, 1),
            },
        },
        Document {
            id: 2,
            data: Person {
                name: "Lee".into(),
                birthday: date(1985, 8, 20),
            },
        },
    ];
    let upcoming = projector::upcoming_birthdays(&people, date(2025, 6, 15));
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].0, "Sam");
    assert_eq!(upcoming[0].1, date(2025, 7, 1));
}
