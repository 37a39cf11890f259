// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::income::docs_json;
use crate::engine::reconciler;
use crate::models::Expense;
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{
    date_in_prefix, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        Some(("item", sub)) => item(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_fields(sub: &clap::ArgMatches) -> Result<Expense> {
    Ok(Expense {
        payee: sub.get_one::<String>("payee").unwrap().clone(),
        category: sub.get_one::<String>("category").unwrap().clone(),
        subcategory: sub.get_one::<String>("subcategory").unwrap().clone(),
        payment_type: sub.get_one::<String>("payment").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        notes: sub.get_one::<String>("notes").cloned().unwrap_or_default(),
        items: Vec::new(),
    })
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let expense = parse_fields(sub)?;
    let id = session.store_mut().create(Collection::Expenses, &expense)?;
    println!(
        "Added expense {} {} (id {})",
        expense.payee,
        fmt_money(&expense.amount),
        id
    );
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let mut docs = session.store().list::<Expense>(Collection::Expenses)?;
    if let Some(month) = &month {
        docs.retain(|d| date_in_prefix(d.data.date, month));
    }
    docs.sort_by_key(|d| std::cmp::Reverse(d.data.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        docs.truncate(*limit);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
        return Ok(());
    }
    let data = docs
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.data.date.to_string(),
                d.data.payee.clone(),
                format!("{} / {}", d.data.category, d.data.subcategory),
                d.data.payment_type.clone(),
                fmt_money(&d.data.amount),
                d.data.items.len().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Payee", "Category", "Payment", "Amount", "Items"],
            data
        )
    );
    Ok(())
}

/// Full-record overwrite of the user-entered fields. The item list is
/// carried over from the stored record.
fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut expense = parse_fields(sub)?;
    let current = session.store().get::<Expense>(Collection::Expenses, id)?;
    expense.items = current.data.items;
    session.store_mut().update(Collection::Expenses, id, &expense)?;
    println!("Updated expense {}", id);
    Ok(())
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    session.store_mut().delete(Collection::Expenses, id)?;
    println!("Deleted expense {}", id);
    Ok(())
}

fn item(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let expense_id = *sub.get_one::<i64>("expense").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let expense = reconciler::add_item(session, expense_id, name, amount)?;
            println!(
                "Added item to expense {}; remaining {}",
                expense_id,
                fmt_money(&reconciler::remaining(&expense))
            );
        }
        Some(("rm", sub)) => {
            let expense_id = *sub.get_one::<i64>("expense").unwrap();
            let index = *sub.get_one::<usize>("index").unwrap();
            let expense = reconciler::remove_item(session, expense_id, index)?;
            println!(
                "Removed item {} from expense {}; remaining {}",
                index,
                expense_id,
                fmt_money(&reconciler::remaining(&expense))
            );
        }
        Some(("list", sub)) => {
            let expense_id = *sub.get_one::<i64>("expense").unwrap();
            let doc = session
                .store()
                .get::<Expense>(Collection::Expenses, expense_id)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &doc.data.items)? {
                return Ok(());
            }
            let data = doc
                .data
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| vec![i.to_string(), item.name.clone(), fmt_money(&item.amount)])
                .collect();
            println!("{}", pretty_table(&["#", "Item", "Amount"], data));
            let remaining = reconciler::remaining(&doc.data);
            if reconciler::is_fully_itemized(&doc.data) {
                println!("Fully itemized.");
            } else {
                println!("Remaining: {}", fmt_money(&remaining));
            }
        }
        _ => {}
    }
    Ok(())
}
