// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use homeledger::{cli, commands, db, session::Session, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let mut session = match matches.get_one::<String>("as_of") {
        Some(s) => Session::open_at(conn, utils::parse_date(s)?),
        None => Session::open(conn),
    };

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("income", sub)) => commands::income::handle(&mut session, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut session, sub)?,
        Some(("subscription", sub)) => commands::subscriptions::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("points", sub)) => commands::points::handle(&mut session, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut session, sub)?,
        Some(("payment", sub)) => commands::payments::handle(&mut session, sub)?,
        Some(("person", sub)) => commands::people::handle(&mut session, sub)?,
        Some(("grocery", sub)) => commands::grocery::handle(&mut session, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut session, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    session.close();
    Ok(())
}
