// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::store::Collection;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;

/// Dump every collection into one JSON object keyed by collection name.
/// Ids are not exported; the import path assigns fresh ones.
pub fn handle(session: &mut Session, m: &clap::ArgMatches) -> Result<()> {
    let out = m.get_one::<String>("out").unwrap();
    let mut root = Map::new();
    for c in Collection::ALL {
        let docs = session.store().list_raw(c)?;
        let bodies: Vec<Value> = docs.into_iter().map(|d| d.data).collect();
        root.insert(c.name().to_string(), Value::Array(bodies));
    }
    let text = serde_json::to_string_pretty(&Value::Object(root))?;
    fs::write(out, text).with_context(|| format!("Write {}", out))?;
    println!("Exported all collections to {}", out);
    Ok(())
}
