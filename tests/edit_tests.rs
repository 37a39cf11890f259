// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use homeledger::cli;
use homeledger::commands::{budgets, expenses, subscriptions};
use homeledger::models::{Budget, Expense, LineItem, PayType, Subscription, SubscriptionStatus};
use homeledger::session::Session;
use homeledger::store::Collection;
use rusqlite::Connection;

fn setup() -> Session {
    let mut conn = Connection::open_in_memory().unwrap();
    homeledger::db::init_schema(&mut conn).unwrap();
    Session::open_at(conn, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
}

fn run(session: &mut Session, args: &[&str]) {
    let mut argv = vec!["homeledger"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("budget", m)) => budgets::handle(session, m).unwrap(),
        Some(("expense", m)) => expenses::handle(session, m).unwrap(),
        Some(("subscription", m)) => subscriptions::handle(session, m).unwrap(),
        _ => panic!("unexpected subcommand"),
    }
}

#[test]
fn budget_edit_preserves_paid_months() {
    let mut session = setup();
    let id = session
        .store_mut()
        .create(
            Collection::Budgets,
            &Budget {
                category: "Housing".into(),
                subcategory: "Rent".into(),
                amount: "1200".parse().unwrap(),
                payment_method: String::new(),
                pay_type: PayType::Manual,
                due_day: Some(1),
                paid_months: ["2025-05".to_string(), "2025-06".to_string()]
                    .into_iter()
                    .collect(),
            },
        )
        .unwrap();

    let id_s = id.to_string();
    run(
        &mut session,
        &[
            "budget", "edit", "--id", &id_s, "--category", "Housing", "--subcategory",
            "Mortgage", "--amount", "1500", "--pay-type", "Auto", "--due-day", "5",
        ],
    );

    let doc = session
        .store()
        .get::<Budget>(Collection::Budgets, id)
        .unwrap();
    assert_eq!(doc.data.subcategory, "Mortgage");
    assert_eq!(doc.data.pay_type, PayType::Auto);
    assert!(doc.data.paid_months.contains("2025-05"));
    assert!(doc.data.paid_months.contains("2025-06"));
}

#[test]
fn expense_edit_preserves_items() {
    let mut session = setup();
    let id = session
        .store_mut()
        .create(
            Collection::Expenses,
            &Expense {
                payee: "Fresh Mart".into(),
                category: "Food".into(),
                subcategory: "Groceries".into(),
                payment_type: "Visa".into(),
                amount: "50.00".parse().unwrap(),
                date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
                notes: String::new(),
                items: vec![LineItem {
                    name: "Milk".into(),
                    amount: "3.49".parse().unwrap(),
                }],
            },
        )
        .unwrap();

    let id_s = id.to_string();
    run(
        &mut session,
        &[
            "expense", "edit", "--id", &id_s, "--date", "2025-06-11", "--payee",
            "Corner Store", "--category", "Food", "--subcategory", "Groceries",
            "--payment", "Amex", "--amount", "55.00",
        ],
    );

    let doc = session
        .store()
        .get::<Expense>(Collection::Expenses, id)
        .unwrap();
    assert_eq!(doc.data.payee, "Corner Store");
    assert_eq!(doc.data.payment_type, "Amex");
    assert_eq!(doc.data.items.len(), 1);
    assert_eq!(doc.data.items[0].name, "Milk");
}

#[test]
fn subscription_edit_preserves_status() {
    let mut session = setup();
    let id = session
        .store_mut()
        .create(
            Collection::Subscriptions,
            &Subscription {
                name: "Stream+".into(),
                amount: "15.99".parse().unwrap(),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                payment_method: String::new(),
                status: SubscriptionStatus::Cancelled,
            },
        )
        .unwrap();

    let id_s = id.to_string();
    run(
        &mut session,
        &[
            "subscription", "edit", "--id", &id_s, "--name", "Stream Premium",
            "--amount", "19.99", "--start", "2024-01-20",
        ],
    );

    let doc = session
        .store()
        .get::<Subscription>(Collection::Subscriptions, id)
        .unwrap();
    assert_eq!(doc.data.name, "Stream Premium");
    assert_eq!(doc.data.status, SubscriptionStatus::Cancelled);
}
