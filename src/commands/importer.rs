// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Expense;
use crate::session::Session;
use crate::store::{BatchOp, Collection};
use crate::utils::{parse_date, parse_decimal};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::fs;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("json", sub)) => import_json(session, sub)?,
        Some(("csv", sub)) => import_csv(session, sub)?,
        _ => {}
    }
    Ok(())
}

/// Restore from a JSON backup: every collection present in the file is
/// cleared and refilled in one atomic batch. Ids in the file are ignored;
/// the store assigns fresh ones. Collections absent from the file are left
/// untouched.
fn import_json(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let text = fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    let root: Value = serde_json::from_str(&text).context("Backup is not valid JSON")?;
    let Some(obj) = root.as_object() else {
        bail!("Backup must be a JSON object keyed by collection name");
    };

    let mut ops = Vec::new();
    let mut counts = Vec::new();
    for (key, value) in obj {
        let Some(c) = Collection::from_name(key) else {
            bail!("Unknown collection '{}' in backup", key);
        };
        let Some(records) = value.as_array() else {
            bail!("Collection '{}' must be an array", key);
        };
        ops.push(BatchOp::Clear(c));
        for record in records {
            let mut body = record.clone();
            if let Some(map) = body.as_object_mut() {
                map.remove("id");
            }
            ops.push(BatchOp::Create(c, body));
        }
        counts.push((c, records.len()));
    }

    session.store_mut().apply_batch(&ops)?;
    for (c, n) in counts {
        println!("Imported {} record(s) into {}", n, c);
    }
    Ok(())
}

/// Add expenses from a CSV export. Rows missing any of Date, Payee,
/// Category, or Amount are skipped and counted; the rest are inserted in
/// one atomic batch. A missing Subcategory falls back to "Uncategorized"
/// and a missing Payment Type to "Unknown" so imported rows still group
/// in reports.
fn import_csv(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap();
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open {}", path))?;

    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (date_i, payee_i, cat_i, amount_i) = match (
        col("Date"),
        col("Payee"),
        col("Category"),
        col("Amount"),
    ) {
        (Some(d), Some(p), Some(c), Some(a)) => (d, p, c, a),
        _ => bail!("CSV must have Date, Payee, Category, and Amount columns"),
    };
    let sub_i = col("Subcategory");
    let pay_i = col("Payment Type");
    let notes_i = col("Notes");

    let mut ops = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        let opt_field = |i: Option<usize>| i.map(|i| field(i)).unwrap_or_default();

        let date_s = field(date_i);
        let payee = field(payee_i);
        let category = field(cat_i);
        let amount_s = field(amount_i);
        if date_s.is_empty() || payee.is_empty() || category.is_empty() || amount_s.is_empty() {
            skipped += 1;
            continue;
        }
        let subcategory = match opt_field(sub_i) {
            s if s.is_empty() => "Uncategorized".to_string(),
            s => s,
        };
        let payment_type = match opt_field(pay_i) {
            s if s.is_empty() => "Unknown".to_string(),
            s => s,
        };
        let expense = Expense {
            payee,
            category,
            subcategory,
            payment_type,
            amount: parse_decimal(&amount_s)?,
            date: parse_date(&date_s)?,
            notes: opt_field(notes_i),
            items: Vec::new(),
        };
        ops.push(BatchOp::Create(
            Collection::Expenses,
            serde_json::to_value(&expense)?,
        ));
    }

    let imported = ops.len();
    session.store_mut().apply_batch(&ops)?;
    println!("Imported {} expense(s), skipped {} incomplete row(s)", imported, skipped);
    Ok(())
}
