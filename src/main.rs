// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use budgetmaster::{cli, commands, db, logging};

fn main() -> Result<()> {
    logging::init_logging();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    // Cleaning is pure; it never needs the database.
    if let Some(("clean", sub)) = matches.subcommand() {
        return commands::clean::handle(sub);
    }

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("goal", sub)) => commands::savings::handle(&mut conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&mut conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
