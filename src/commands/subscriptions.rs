// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::income::docs_json;
use crate::engine::projector;
use crate::models::{Subscription, SubscriptionStatus};
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("toggle", sub)) => toggle(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_fields(sub: &clap::ArgMatches) -> Result<Subscription> {
    Ok(Subscription {
        name: sub.get_one::<String>("name").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        start_date: parse_date(sub.get_one::<String>("start").unwrap())?,
        payment_method: sub.get_one::<String>("method").cloned().unwrap_or_default(),
        status: SubscriptionStatus::Active,
    })
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let subscription = parse_fields(sub)?;
    let id = session
        .store_mut()
        .create(Collection::Subscriptions, &subscription)?;
    println!("Added subscription {} (id {})", subscription.name, id);
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let docs = session
        .store()
        .list::<Subscription>(Collection::Subscriptions)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
        return Ok(());
    }
    let today = session.today();
    let data = docs
        .iter()
        .map(|d| {
            let next = if d.data.status.is_active() {
                projector::next_billing_date(&d.data, today)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into())
            } else {
                "-".into()
            };
            vec![
                d.id.to_string(),
                d.data.name.clone(),
                fmt_money(&d.data.amount),
                if d.data.status.is_active() {
                    "active".into()
                } else {
                    "cancelled".into()
                },
                next,
                d.data.payment_method.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Amount", "Status", "Next billing", "Method"],
            data
        )
    );
    Ok(())
}

fn toggle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut doc = session
        .store()
        .get::<Subscription>(Collection::Subscriptions, id)?;
    doc.data.status = doc.data.status.toggled();
    session
        .store_mut()
        .update(Collection::Subscriptions, id, &doc.data)?;
    println!(
        "Subscription {} is now {}",
        doc.data.name,
        if doc.data.status.is_active() {
            "active"
        } else {
            "cancelled"
        }
    );
    Ok(())
}

/// Overwrites everything except the status, which survives edits.
fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut subscription = parse_fields(sub)?;
    let current = session
        .store()
        .get::<Subscription>(Collection::Subscriptions, id)?;
    subscription.status = current.data.status;
    session
        .store_mut()
        .update(Collection::Subscriptions, id, &subscription)?;
    println!("Updated subscription {}", id);
    Ok(())
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    session.store_mut().delete(Collection::Subscriptions, id)?;
    println!("Deleted subscription {}", id);
    Ok(())
}
