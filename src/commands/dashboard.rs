// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{aggregator, projector};
use crate::models::{Budget, Expense, Subscription};
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("feed", sub)) => feed(session, sub)?,
        Some(("summary", _)) => summary(session)?,
        Some(("calendar", sub)) => calendar(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn feed(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let expenses = session.store().list::<Expense>(Collection::Expenses)?;
    let budgets = session.store().list::<Budget>(Collection::Budgets)?;
    let subscriptions = session
        .store()
        .list::<Subscription>(Collection::Subscriptions)?;
    let snapshot = projector::FeedSnapshot {
        expenses: &expenses,
        budgets: &budgets,
        subscriptions: &subscriptions,
    };
    let events = projector::recompute(&snapshot, session.today());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &events)? {
        return Ok(());
    }
    if events.is_empty() {
        println!("Nothing recent or upcoming.");
        return Ok(());
    }
    for (date, bucket) in projector::group_by_date(events) {
        println!("{}", date);
        let data = bucket
            .into_iter()
            .map(|e| {
                vec![
                    e.tag.label().to_string(),
                    e.description,
                    fmt_money(&e.amount),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["", "Description", "Amount"], data));
    }
    Ok(())
}

fn summary(session: &mut Session) -> Result<()> {
    let budgets = session.store().list::<Budget>(Collection::Budgets)?;
    let subscriptions = session
        .store()
        .list::<Subscription>(Collection::Subscriptions)?;
    let expenses = session.store().list::<Expense>(Collection::Expenses)?;
    let cards = aggregator::summary_cards(&budgets, &subscriptions, &expenses, &session.period());
    let data = vec![vec![
        fmt_money(&cards.budgeted),
        fmt_money(&cards.spent),
        fmt_money(&cards.remaining),
    ]];
    println!(
        "{}",
        pretty_table(&["Budgeted", "Spent", "Remaining"], data)
    );
    Ok(())
}

fn calendar(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => session.period(),
    };
    let (year, mon) = {
        let mut parts = month.splitn(2, '-');
        let year: i32 = parts.next().unwrap_or_default().parse()?;
        let mon: u32 = parts.next().unwrap_or_default().parse()?;
        (year, mon)
    };
    let expenses = session.store().list::<Expense>(Collection::Expenses)?;
    let subscriptions = session
        .store()
        .list::<Subscription>(Collection::Subscriptions)?;
    let by_day = aggregator::month_calendar(&expenses, &subscriptions, year, mon);
    if by_day.is_empty() {
        println!("Nothing in {}.", month);
        return Ok(());
    }
    let mut data = Vec::new();
    for (day, entries) in by_day {
        for e in entries {
            data.push(vec![
                format!("{}-{:02}", month, day),
                e.description,
                fmt_money(&e.amount),
                if e.subscription { "subscription".into() } else { "expense".into() },
            ]);
        }
    }
    println!("{}", pretty_table(&["Date", "Description", "Amount", ""], data));
    Ok(())
}
