// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CanonicalRow, Category, StoredTransaction};
use crate::utils::{
    maybe_print_json, parse_date, parse_decimal, parse_month, parse_user, pretty_table,
    stored_decimal,
};
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("types", sub)) => types(conn, sub)?,
        Some(("add", sub)) => add(conn, sub)?,
        Some(("delete", sub)) => {
            let user = parse_user(sub.get_one::<String>("user").unwrap())?;
            let id = *sub.get_one::<i64>("id").unwrap();
            delete_transaction(conn, &user, id)?;
            println!("Deleted transaction {} for '{}'", id, user);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub month: Option<String>,
    pub category: Option<Category>,
    pub limit: Option<usize>,
}

impl TxFilter {
    pub fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        let month = sub
            .get_one::<String>("month")
            .map(|m| parse_month(m))
            .transpose()?;
        let category = sub
            .get_one::<String>("category")
            .map(|c| c.parse::<Category>())
            .transpose()?;
        Ok(Self {
            month,
            category,
            limit: sub.get_one::<usize>("limit").copied(),
        })
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = parse_user(sub.get_one::<String>("user").unwrap())?;
    let filter = TxFilter::from_matches(sub)?;
    let data = query_rows(conn, &user, &filter)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.to_string(),
                    r.r#type.clone(),
                    r.category.to_string(),
                    format!("{:.2}", r.amount),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Description"],
                rows
            )
        );
    }
    Ok(())
}

fn types(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = parse_user(sub.get_one::<String>("user").unwrap())?;
    let data = distinct_types(conn, &user)?;
    if !maybe_print_json(sub.get_flag("json"), false, &data)? {
        let rows = data.into_iter().map(|t| vec![t]).collect();
        println!("{}", pretty_table(&["Type"], rows));
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = parse_user(sub.get_one::<String>("user").unwrap())?;
    let row = CanonicalRow {
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        r#type: sub
            .get_one::<String>("type")
            .cloned()
            .unwrap_or_default(),
        category: sub.get_one::<String>("category").unwrap().parse()?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        description: sub.get_one::<String>("description").cloned(),
    };
    let id = add_transaction(conn, &user, &row)?;
    println!(
        "Added {} {} {:.2} on {} (id {})",
        row.category, row.r#type, row.amount, row.date, id
    );
    Ok(())
}

/// Stores one hand-entered transaction and returns its id.
pub fn add_transaction(conn: &Connection, user: &str, row: &CanonicalRow) -> Result<i64> {
    if row.amount < Decimal::ZERO {
        return Err(anyhow!("Amount must not be negative"));
    }
    conn.execute(
        "INSERT INTO transactions(user_id, date, type, category, amount, description)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            user,
            row.date.to_string(),
            row.r#type,
            row.category.as_str(),
            row.amount.to_string(),
            row.description.as_deref().unwrap_or_default(),
        ],
    )
    .context("Insert transaction")?;
    Ok(conn.last_insert_rowid())
}

/// Deletes one of `user`'s transactions; another user's id is reported as not found.
pub fn delete_transaction(conn: &Connection, user: &str, id: i64) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction {} not found for '{}'", id, user));
    }
    info!(user, id, "transaction deleted");
    Ok(())
}

/// A user's stored transactions, newest first.
pub fn query_rows(
    conn: &Connection,
    user: &str,
    filter: &TxFilter,
) -> Result<Vec<StoredTransaction>> {
    let mut sql = String::from(
        "SELECT id, user_id, date, type, category, amount, description, created_at
         FROM transactions WHERE user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user.to_string()];

    if let Some(month) = &filter.month {
        sql.push_str(" AND substr(date,1,7)=?");
        params_vec.push(month.clone());
    }
    if let Some(cat) = filter.category {
        sql.push_str(" AND category=?");
        params_vec.push(cat.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(2)?;
        let category: String = r.get(4)?;
        let amount: String = r.get(5)?;
        data.push(StoredTransaction {
            id: r.get(0)?,
            user_id: r.get(1)?,
            date: parse_date(&date)?,
            r#type: r.get(3)?,
            category: category.parse()?,
            amount: stored_decimal(&amount)?,
            description: r.get(6)?,
            created_at: r.get(7)?,
        });
    }
    Ok(data)
}

/// Distinct non-empty types in the order they were first stored.
pub fn distinct_types(conn: &Connection, user: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT type FROM transactions WHERE user_id=?1 AND type<>''
         GROUP BY type ORDER BY MIN(id)",
    )?;
    let rows = stmt.query_map(params![user], |r| r.get::<_, String>(0))?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    Ok(data)
}
