// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use homeledger::commands::{exporter, importer};
use homeledger::models::{Budget, Expense, GroceryItem, PayType};
use homeledger::session::Session;
use homeledger::store::Collection;
use homeledger::cli;
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Session {
    let mut conn = Connection::open_in_memory().unwrap();
    homeledger::db::init_schema(&mut conn).unwrap();
    Session::open_at(conn, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
}

fn run_import(session: &mut Session, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["homeledger", "import"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("import", m)) => importer::handle(session, m),
        _ => panic!("no import subcommand"),
    }
}

#[test]
fn csv_import_skips_incomplete_rows() {
    let mut session = setup();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Date,Payee,Category,Subcategory,Payment Type,Amount,Notes\n\
         2025-06-01,Fresh Mart,Food,Groceries,Visa,54.10,weekly run\n\
         2025-06-02,,Food,Groceries,Visa,12.00,missing payee\n\
         2025-06-03,Diner,Food,Dining,Amex,23.75,"
    )
    .unwrap();
    file.flush().unwrap();

    run_import(&mut session, &["csv", "--path", file.path().to_str().unwrap()]).unwrap();

    let docs = session.store().list::<Expense>(Collection::Expenses).unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].data.payee, "Fresh Mart");
    assert_eq!(docs[0].data.notes, "weekly run");
    assert_eq!(docs[1].data.payment_type, "Amex");
    assert!(docs[1].data.items.is_empty());
}

#[test]
fn csv_import_defaults_missing_optional_columns() {
    let mut session = setup();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Date,Payee,Category,Subcategory,Payment Type,Amount,Notes\n\
         2025-06-01,Fresh Mart,Food,,,54.10,"
    )
    .unwrap();
    file.flush().unwrap();

    run_import(&mut session, &["csv", "--path", file.path().to_str().unwrap()]).unwrap();

    let docs = session.store().list::<Expense>(Collection::Expenses).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].data.subcategory, "Uncategorized");
    assert_eq!(docs[0].data.payment_type, "Unknown");
}

#[test]
fn csv_import_requires_core_headers() {
    let mut session = setup();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Payee,Amount\n2025-06-01,Shop,5.00").unwrap();
    file.flush().unwrap();

    let err = run_import(&mut session, &["csv", "--path", file.path().to_str().unwrap()])
        .unwrap_err();
    assert!(err.to_string().contains("Category"));
    assert!(session
        .store()
        .list::<Expense>(Collection::Expenses)
        .unwrap()
        .is_empty());
}

#[test]
fn csv_import_rolls_back_on_bad_amount() {
    let mut session = setup();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Date,Payee,Category,Subcategory,Payment Type,Amount,Notes\n\
         2025-06-01,Shop,Food,Groceries,Visa,5.00,\n\
         2025-06-02,Shop,Food,Groceries,Visa,abc,"
    )
    .unwrap();
    file.flush().unwrap();

    let err = run_import(&mut session, &["csv", "--path", file.path().to_str().unwrap()])
        .unwrap_err();
    assert!(err.to_string().contains("Invalid decimal 'abc'"));
    assert!(session
        .store()
        .list::<Expense>(Collection::Expenses)
        .unwrap()
        .is_empty());
}

#[test]
fn json_round_trip_regenerates_ids() {
    let mut source = setup();
    source
        .store_mut()
        .create(
            Collection::Budgets,
            &Budget {
                category: "Housing".into(),
                subcategory: "Rent".into(),
                amount: "1200".parse().unwrap(),
                payment_method: String::new(),
                pay_type: PayType::Auto,
                due_day: Some(1),
                paid_months: ["2025-05".to_string()].into_iter().collect(),
            },
        )
        .unwrap();
    source
        .store_mut()
        .create(Collection::GroceryItems, &GroceryItem { name: "Milk".into() })
        .unwrap();

    let out = NamedTempFile::new().unwrap();
    let path = out.path().to_str().unwrap().to_string();
    let matches = cli::build_cli().get_matches_from(["homeledger", "export", "--out", &path]);
    match matches.subcommand() {
        Some(("export", m)) => exporter::handle(&mut source, m).unwrap(),
        _ => panic!("no export subcommand"),
    }

    let mut target = setup();
    // Pre-existing data in an imported collection is replaced.
    target
        .store_mut()
        .create(Collection::GroceryItems, &GroceryItem { name: "Stale".into() })
        .unwrap();

    run_import(&mut target, &["json", "--path", &path]).unwrap();

    let budgets = target.store().list::<Budget>(Collection::Budgets).unwrap();
    assert_eq!(budgets.len(), 1);
    assert!(budgets[0].data.paid_months.contains("2025-05"));
    assert_eq!(budgets[0].data.pay_type, PayType::Auto);

    let items = target
        .store()
        .list::<GroceryItem>(Collection::GroceryItems)
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].data.name, "Milk");
}

#[test]
fn json_import_rejects_unknown_collections() {
    let mut session = setup();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", r#"{"investments": []}"#).unwrap();
    file.flush().unwrap();

    let err = run_import(&mut session, &["json", "--path", file.path().to_str().unwrap()])
        .unwrap_err();
    assert!(err.to_string().contains("Unknown collection 'investments'"));
}
