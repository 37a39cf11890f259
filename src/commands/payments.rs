// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::income::docs_json;
use crate::models::PaymentMethod;
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let method = PaymentMethod {
                name: sub.get_one::<String>("name").unwrap().clone(),
                kind: sub.get_one::<String>("type").unwrap().clone(),
            };
            let id = session
                .store_mut()
                .create(Collection::PaymentMethods, &method)?;
            println!("Added payment method {} (id {})", method.name, id);
        }
        Some(("list", sub)) => {
            let docs = session
                .store()
                .list::<PaymentMethod>(Collection::PaymentMethods)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
                return Ok(());
            }
            let data = docs
                .iter()
                .map(|d| vec![d.id.to_string(), d.data.name.clone(), d.data.kind.clone()])
                .collect();
            println!("{}", pretty_table(&["ID", "Name", "Type"], data));
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            session.store_mut().delete(Collection::PaymentMethods, id)?;
            println!("Deleted payment method {}", id);
        }
        _ => {}
    }
    Ok(())
}
