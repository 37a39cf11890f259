// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::income::docs_json;
use crate::models::PointRule;
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{bail, Result};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let rule = PointRule {
        category: sub.get_one::<String>("category").unwrap().clone(),
        subcategory: sub.get_one::<String>("subcategory").unwrap().clone(),
        card: sub.get_one::<String>("card").unwrap().clone(),
        multiplier: parse_decimal(sub.get_one::<String>("multiplier").unwrap())?,
    };
    if rule.multiplier < rust_decimal::Decimal::ZERO {
        bail!("Multiplier cannot be negative");
    }
    let id = session.store_mut().create(Collection::PointRules, &rule)?;
    println!(
        "Added rule {} / {} -> {}x on {} (id {})",
        rule.category, rule.subcategory, rule.multiplier, rule.card, id
    );
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let docs = session.store().list::<PointRule>(Collection::PointRules)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
        return Ok(());
    }
    let data = docs
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.data.category.clone(),
                d.data.subcategory.clone(),
                d.data.card.clone(),
                d.data.multiplier.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Category", "Subcategory", "Card", "Multiplier"], data)
    );
    Ok(())
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    session.store_mut().delete(Collection::PointRules, id)?;
    println!("Deleted rule {}", id);
    Ok(())
}
