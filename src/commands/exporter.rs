// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::fs::File;
use std::io::{self, Write};

use crate::commands::transactions::{TxFilter, query_rows};
use crate::models::CanonicalRow;
use crate::utils::parse_user;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("Unknown format: {} (use csv|json)", other)),
        }
    }
}

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = parse_user(sub.get_one::<String>("user").unwrap())?;
    let fmt = OutputFormat::parse(sub.get_one::<String>("format").unwrap())?;
    let out = sub.get_one::<String>("out").unwrap().trim();

    let mut stored = query_rows(conn, &user, &TxFilter::default())?;
    stored.reverse();
    let rows: Vec<CanonicalRow> = stored.into_iter().map(CanonicalRow::from).collect();

    write_to_path(out, fmt, &rows, true)?;
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

pub fn write_to_path(
    path: &str,
    fmt: OutputFormat,
    rows: &[CanonicalRow],
    include_description: bool,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Create {}", path))?;
    write_rows(file, fmt, rows, include_description)
}

pub fn write_rows<W: Write>(
    mut w: W,
    fmt: OutputFormat,
    rows: &[CanonicalRow],
    include_description: bool,
) -> Result<()> {
    match fmt {
        OutputFormat::Csv => write_csv(w, rows, include_description),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut w, rows)?;
            writeln!(w)?;
            w.flush()?;
            Ok(())
        }
    }
}

pub fn write_csv<W: Write>(w: W, rows: &[CanonicalRow], include_description: bool) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    let mut header = vec!["date", "type", "category", "amount"];
    if include_description {
        header.push("description");
    }
    wtr.write_record(&header)?;
    for r in rows {
        let mut rec = vec![
            r.date.to_string(),
            r.r#type.clone(),
            r.category.to_string(),
            format!("{:.2}", r.amount),
        ];
        if include_description {
            rec.push(r.description.clone().unwrap_or_default());
        }
        wtr.write_record(&rec)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_stdout(fmt: OutputFormat, rows: &[CanonicalRow], include_description: bool) -> Result<()> {
    let stdout = io::stdout();
    write_rows(stdout.lock(), fmt, rows, include_description)
}
