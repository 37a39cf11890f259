// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::income::docs_json;
use crate::models::Category;
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{bail, Result};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("rename", sub)) => rename(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        Some(("sub", sub)) => subcategory(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let category = Category {
        name: sub.get_one::<String>("name").unwrap().clone(),
        subcategories: Vec::new(),
    };
    let id = session.store_mut().create(Collection::Categories, &category)?;
    println!("Added category {} (id {})", category.name, id);
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let docs = session.store().list::<Category>(Collection::Categories)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
        return Ok(());
    }
    let data = docs
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.data.name.clone(),
                d.data.subcategories.join(", "),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Category", "Subcategories"], data));
    Ok(())
}

fn rename(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut doc = session.store().get::<Category>(Collection::Categories, id)?;
    doc.data.name = sub.get_one::<String>("name").unwrap().clone();
    session.store_mut().update(Collection::Categories, id, &doc.data)?;
    println!("Renamed category {} to {}", id, doc.data.name);
    Ok(())
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    session.store_mut().delete(Collection::Categories, id)?;
    println!("Deleted category {}", id);
    Ok(())
}

fn subcategory(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap().clone();
            let mut doc = session.store().get::<Category>(Collection::Categories, id)?;
            if doc.data.subcategories.contains(&name) {
                bail!("Subcategory '{}' already exists", name);
            }
            doc.data.subcategories.push(name.clone());
            session.store_mut().update(Collection::Categories, id, &doc.data)?;
            println!("Added subcategory {} to {}", name, doc.data.name);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let name = sub.get_one::<String>("name").unwrap();
            let mut doc = session.store().get::<Category>(Collection::Categories, id)?;
            let before = doc.data.subcategories.len();
            doc.data.subcategories.retain(|s| s != name);
            if doc.data.subcategories.len() == before {
                bail!("No subcategory '{}' in {}", name, doc.data.name);
            }
            session.store_mut().update(Collection::Categories, id, &doc.data)?;
            println!("Removed subcategory {} from {}", name, doc.data.name);
        }
        Some(("rename", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let from = sub.get_one::<String>("from").unwrap();
            let to = sub.get_one::<String>("to").unwrap().clone();
            let mut doc = session.store().get::<Category>(Collection::Categories, id)?;
            match doc.data.subcategories.iter_mut().find(|s| *s == from) {
                Some(slot) => *slot = to.clone(),
                None => bail!("No subcategory '{}' in {}", from, doc.data.name),
            }
            session.store_mut().update(Collection::Categories, id, &doc.data)?;
            println!("Renamed subcategory {} to {}", from, to);
        }
        _ => {}
    }
    Ok(())
}
