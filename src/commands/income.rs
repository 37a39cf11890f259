// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Income, IncomeKind};
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{bail, Result};

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_fields(sub: &clap::ArgMatches) -> Result<Income> {
    let kind = match sub.get_one::<String>("type").unwrap().as_str() {
        "recurring" => IncomeKind::Recurring,
        _ => IncomeKind::OneTime,
    };
    let date = sub
        .get_one::<String>("date")
        .map(|s| parse_date(s))
        .transpose()?;
    if kind == IncomeKind::OneTime && date.is_none() {
        bail!("One-time income requires --date");
    }
    Ok(Income {
        name: sub.get_one::<String>("name").unwrap().clone(),
        source: sub.get_one::<String>("source").unwrap().clone(),
        kind,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        date,
    })
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let income = parse_fields(sub)?;
    let id = session.store_mut().create(Collection::Income, &income)?;
    println!("Added income {} (id {})", income.name, id);
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let docs = session.store().list::<Income>(Collection::Income)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
        return Ok(());
    }
    let data = docs
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.data.name.clone(),
                d.data.source.clone(),
                match d.data.kind {
                    IncomeKind::Recurring => "recurring".into(),
                    IncomeKind::OneTime => "one-time".into(),
                },
                fmt_money(&d.data.amount),
                d.data
                    .date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Source", "Type", "Amount", "Date"], data)
    );
    Ok(())
}

fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let income = parse_fields(sub)?;
    session.store_mut().update(Collection::Income, id, &income)?;
    println!("Updated income {}", id);
    Ok(())
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    session.store_mut().delete(Collection::Income, id)?;
    println!("Deleted income {}", id);
    Ok(())
}

pub(crate) fn docs_json<T: serde::Serialize>(
    docs: &[crate::store::Document<T>],
) -> Result<Vec<serde_json::Value>> {
    docs.iter()
        .map(|d| {
            let mut v = serde_json::to_value(&d.data)?;
            if let Some(obj) = v.as_object_mut() {
                obj.insert("id".into(), serde_json::json!(d.id));
            }
            Ok(v)
        })
        .collect()
}
