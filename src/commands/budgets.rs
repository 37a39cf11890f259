// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::income::docs_json;
use crate::engine::tracker;
use crate::models::{Budget, PayType};
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("toggle", sub)) => toggle(session, sub)?,
        Some(("sweep", _)) => sweep(session)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_fields(sub: &clap::ArgMatches) -> Result<Budget> {
    let pay_type = match sub.get_one::<String>("pay_type").unwrap().as_str() {
        "Auto" => PayType::Auto,
        _ => PayType::Manual,
    };
    Ok(Budget {
        category: sub.get_one::<String>("category").unwrap().clone(),
        subcategory: sub.get_one::<String>("subcategory").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        payment_method: sub.get_one::<String>("method").cloned().unwrap_or_default(),
        pay_type,
        due_day: sub.get_one::<u32>("due_day").copied(),
        paid_months: Default::default(),
    })
}

fn add(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let budget = parse_fields(sub)?;
    let id = session.store_mut().create(Collection::Budgets, &budget)?;
    println!(
        "Added budget {} / {} (id {})",
        budget.category, budget.subcategory, id
    );
    Ok(())
}

fn list(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let docs = session.store().list::<Budget>(Collection::Budgets)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
        return Ok(());
    }
    let period = session.period();
    let data = docs
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                format!("{} / {}", d.data.category, d.data.subcategory),
                fmt_money(&d.data.amount),
                match d.data.pay_type {
                    PayType::Manual => "Manual".into(),
                    PayType::Auto => "Auto".into(),
                },
                d.data
                    .due_day
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".into()),
                if tracker::is_paid(&d.data, &period) {
                    "paid".into()
                } else {
                    "unpaid".into()
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Budget", "Amount", "Pay type", "Due day", period.as_str()],
            data
        )
    );
    Ok(())
}

fn toggle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let period = match sub.get_one::<String>("period") {
        Some(p) => parse_month(p)?,
        None => session.period(),
    };
    let now_paid = tracker::toggle(session, id, &period)?;
    println!(
        "Budget {} is now {} for {}",
        id,
        if now_paid { "paid" } else { "unpaid" },
        period
    );
    Ok(())
}

fn sweep(session: &mut Session) -> Result<()> {
    let marked = tracker::run_auto_pay_sweep(session)?;
    println!("Marked {} auto-pay budget(s) paid for {}", marked, session.period());
    Ok(())
}

/// Overwrites the user-entered fields; paid months survive edits.
fn edit(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut budget = parse_fields(sub)?;
    let current = session.store().get::<Budget>(Collection::Budgets, id)?;
    budget.paid_months = current.data.paid_months;
    session.store_mut().update(Collection::Budgets, id, &budget)?;
    println!("Updated budget {}", id);
    Ok(())
}

fn rm(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    session.store_mut().delete(Collection::Budgets, id)?;
    println!("Deleted budget {}", id);
    Ok(())
}
