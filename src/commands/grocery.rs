// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{GroceryItem, LineItem, ShoppingList};
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{fmt_money, parse_decimal, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("item", sub)) => item(session, sub)?,
        Some(("list", sub)) => shopping_list(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn item(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let item = GroceryItem {
                name: sub.get_one::<String>("name").unwrap().clone(),
            };
            let id = session.store_mut().create(Collection::GroceryItems, &item)?;
            println!("Added grocery item {} (id {})", item.name, id);
        }
        Some(("list", _)) => {
            let docs = session
                .store()
                .list::<GroceryItem>(Collection::GroceryItems)?;
            let data = docs
                .iter()
                .map(|d| vec![d.id.to_string(), d.data.name.clone()])
                .collect();
            println!("{}", pretty_table(&["ID", "Item"], data));
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            session.store_mut().delete(Collection::GroceryItems, id)?;
            println!("Deleted grocery item {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// "NAME=AMOUNT" entries; a bare "NAME" prices at zero.
fn parse_entry(entry: &str) -> Result<LineItem> {
    match entry.split_once('=') {
        Some((name, amount)) => Ok(LineItem {
            name: name.trim().to_string(),
            amount: parse_decimal(amount.trim())?,
        }),
        None => Ok(LineItem {
            name: entry.trim().to_string(),
            amount: Decimal::ZERO,
        }),
    }
}

fn shopping_list(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => {
            let items = sub
                .get_many::<String>("item")
                .unwrap_or_default()
                .map(|e| parse_entry(e))
                .collect::<Result<Vec<_>>>()?;
            let list = ShoppingList {
                name: sub.get_one::<String>("name").unwrap().clone(),
                items,
                created_at: session.today(),
            };
            let id = session.store_mut().create(Collection::ShoppingLists, &list)?;
            println!(
                "Created list {} with {} item(s), total {} (id {})",
                list.name,
                list.items.len(),
                fmt_money(&list.total()),
                id
            );
        }
        Some(("show", _)) => {
            let docs = session
                .store()
                .list::<ShoppingList>(Collection::ShoppingLists)?;
            for doc in docs {
                println!(
                    "{} ({}): {}",
                    doc.data.name,
                    doc.data.created_at,
                    fmt_money(&doc.data.total())
                );
                let data = doc
                    .data
                    .items
                    .iter()
                    .map(|i| vec![i.name.clone(), fmt_money(&i.amount)])
                    .collect();
                println!("{}", pretty_table(&["Item", "Amount"], data));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            session.store_mut().delete(Collection::ShoppingLists, id)?;
            println!("Deleted list {}", id);
        }
        _ => {}
    }
    Ok(())
}
