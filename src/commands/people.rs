// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::income::docs_json;
use crate::engine::projector;
use crate::models::Person;
use crate::session::Session;
use crate::store::Collection;
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;

pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let person = Person {
                name: sub.get_one::<String>("name").unwrap().clone(),
                birthday: parse_date(sub.get_one::<String>("birthday").unwrap())?,
            };
            let id = session.store_mut().create(Collection::People, &person)?;
            println!("Added {} (id {})", person.name, id);
        }
        Some(("list", sub)) => {
            let docs = session.store().list::<Person>(Collection::People)?;
            if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &docs_json(&docs)?)? {
                return Ok(());
            }
            let data = docs
                .iter()
                .map(|d| {
                    vec![
                        d.id.to_string(),
                        d.data.name.clone(),
                        d.data.birthday.to_string(),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["ID", "Name", "Birthday"], data));
        }
        Some(("birthdays", _)) => {
            let docs = session.store().list::<Person>(Collection::People)?;
            let upcoming = projector::upcoming_birthdays(&docs, session.today());
            if upcoming.is_empty() {
                println!("No birthdays in the next 30 days.");
            } else {
                let data = upcoming
                    .into_iter()
                    .map(|(name, date)| vec![date.to_string(), name])
                    .collect();
                println!("{}", pretty_table(&["Date", "Name"], data));
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            session.store_mut().delete(Collection::People, id)?;
            println!("Deleted person {}", id);
        }
        _ => {}
    }
    Ok(())
}
