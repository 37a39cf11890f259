// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{aggregator, rewards};
use crate::models::{Budget, Expense, Income, PointRule, Subscription};
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{date_in_prefix, fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};
use serde_json::json;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(session, sub)?,
        Some(("yearly", sub)) => yearly(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn monthly(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let income = session.store().list::<Income>(Collection::Income)?;
    let expenses = session.store().list::<Expense>(Collection::Expenses)?;
    let subscriptions = session
        .store()
        .list::<Subscription>(Collection::Subscriptions)?;
    let budgets = session.store().list::<Budget>(Collection::Budgets)?;
    let rules = session.store().list::<PointRule>(Collection::PointRules)?;

    let overview = aggregator::monthly_overview(&income, &expenses, &subscriptions, &month);
    let report = aggregator::budget_vs_actual(&budgets, &subscriptions, &expenses, &month);
    let by_category = aggregator::monthly_category_spend(&expenses, &subscriptions, &month);
    let by_payment = aggregator::spend_by_payment_type(&expenses, &month);
    let month_expenses: Vec<_> = expenses
        .iter()
        .filter(|e| date_in_prefix(e.data.date, &month))
        .cloned()
        .collect();
    let points = rewards::points_by_card(&month_expenses, &rules);

    if sub.get_flag("json") || sub.get_flag("jsonl") {
        let payload = json!({
            "month": month,
            "overview": overview,
            "budgetVsActual": report,
            "byCategory": by_category,
            "byPaymentType": by_payment,
            "points": points,
        });
        maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)?;
        return Ok(());
    }

    println!("Overview for {}", month);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Net"],
            vec![vec![
                fmt_money(&overview.income),
                fmt_money(&overview.expenses),
                fmt_money(&overview.net),
            ]]
        )
    );

    let mut rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|r| {
            vec![
                format!("{} / {}", r.category, r.subcategory),
                fmt_money(&r.budgeted),
                fmt_money(&r.actual),
                fmt_money(&(r.budgeted - r.actual)),
            ]
        })
        .collect();
    rows.push(vec![
        "Total".into(),
        fmt_money(&report.total_budgeted),
        fmt_money(&report.total_actual),
        fmt_money(&(report.total_budgeted - report.total_actual)),
    ]);
    println!(
        "{}",
        pretty_table(&["Budget", "Budgeted", "Actual", "Left"], rows)
    );

    println!(
        "{}",
        pretty_table(
            &["Category", "Spent"],
            by_category
                .into_iter()
                .map(|(c, a)| vec![c, fmt_money(&a)])
                .collect()
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Payment type", "Spent"],
            by_payment
                .into_iter()
                .map(|(p, a)| vec![p, fmt_money(&a)])
                .collect()
        )
    );
    if !points.is_empty() {
        println!(
            "{}",
            pretty_table(
                &["Card", "Points"],
                points
                    .into_iter()
                    .map(|(card, pts)| vec![card, pts.to_string()])
                    .collect()
            )
        );
    }
    Ok(())
}

fn yearly(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let year = sub.get_one::<String>("year").unwrap();
    year.parse::<i32>()
        .with_context(|| format!("Invalid year '{}'", year))?;
    let expenses = session.store().list::<Expense>(Collection::Expenses)?;

    let by_category = aggregator::spend_by_category(&expenses, year);
    let by_subcategory = aggregator::yearly_subcategory_spend(&expenses, year);
    let history = sub
        .get_one::<String>("item")
        .map(|item| aggregator::price_history(&expenses, item, year));

    if sub.get_flag("json") || sub.get_flag("jsonl") {
        let payload = json!({
            "year": year,
            "byCategory": by_category,
            "bySubcategory": by_subcategory,
            "priceHistory": history,
        });
        maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)?;
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Category", "Spent"],
            by_category
                .into_iter()
                .map(|(c, a)| vec![c, fmt_money(&a)])
                .collect()
        )
    );
    println!(
        "{}",
        pretty_table(
            &["Category / Subcategory", "Spent"],
            by_subcategory
                .into_iter()
                .map(|(c, a)| vec![c, fmt_money(&a)])
                .collect()
        )
    );
    if let Some(history) = history {
        let data = history
            .into_iter()
            .map(|p| vec![p.date.to_string(), p.payee, fmt_money(&p.amount)])
            .collect();
        println!("{}", pretty_table(&["Date", "Payee", "Price"], data));
    }
    Ok(())
}
