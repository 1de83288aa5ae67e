// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Budget;
use crate::utils::{
    maybe_print_json, parse_decimal, parse_month, parse_user, pretty_table, stored_decimal,
};
use anyhow::{Result, anyhow};
use regex::Regex;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("delete", sub)) => {
            let user = parse_user(sub.get_one::<String>("user").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap().trim();
            let month = parse_month(sub.get_one::<String>("month").unwrap())?;
            delete_budget(conn, &user, name, &month)?;
            println!("Deleted budget '{}' for {} / {}", name, user, month);
        }
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = parse_user(sub.get_one::<String>("user").unwrap())?;
    let name = sub.get_one::<String>("name").unwrap().trim();
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let planned = parse_decimal(sub.get_one::<String>("planned").unwrap())?;
    let pattern = sub
        .get_one::<String>("pattern")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    let recurring = sub.get_flag("recurring");

    set_budget(conn, &user, name, &month, planned, recurring, pattern)?;
    println!("Budget '{}' set for {} / {} = {}", name, user, month, planned);
    Ok(())
}

pub fn set_budget(
    conn: &Connection,
    user: &str,
    name: &str,
    month: &str,
    planned: Decimal,
    recurring: bool,
    pattern: Option<&str>,
) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("Budget name must not be empty"));
    }
    if planned.is_sign_negative() {
        return Err(anyhow!("Planned amount must not be negative"));
    }
    if let Some(p) = pattern {
        Regex::new(p).map_err(|err| anyhow!("Invalid regex pattern '{}': {}", p, err))?;
    }
    conn.execute(
        "INSERT INTO budgets(user_id, name, month, planned, is_recurring, pattern)
         VALUES (?1,?2,?3,?4,?5,?6)
         ON CONFLICT(user_id, name, month) DO UPDATE SET
            planned=excluded.planned,
            is_recurring=excluded.is_recurring,
            pattern=excluded.pattern",
        params![user, name, month, planned.to_string(), recurring, pattern],
    )?;
    Ok(())
}

/// Removes the budget defined for exactly `month`; recurring copies in later months go
/// with it since they are derived from this row.
pub fn delete_budget(conn: &Connection, user: &str, name: &str, month: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM budgets WHERE user_id=?1 AND name=?2 AND month=?3",
        params![user, name, month],
    )?;
    if n == 0 {
        return Err(anyhow!("Budget '{}' for {} not found", name, month));
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = parse_user(sub.get_one::<String>("user").unwrap())?;
    let month = sub
        .get_one::<String>("month")
        .map(|m| parse_month(m))
        .transpose()?;

    let data = budget_rows(conn, &user, month.as_deref())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.month.clone(),
                    b.name.clone(),
                    format!("{:.2}", b.planned),
                    format!("{:.2}", b.spent),
                    format!("{:.2}", b.planned - b.spent),
                    if b.is_recurring { "yes".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Budget", "Planned", "Spent", "Left", "Recurring"],
                rows
            )
        );
    }
    Ok(())
}

/// Budgets with their spend filled in.
///
/// With a month, recurring budgets from earlier months are carried forward and the
/// newest definition of each name wins. Without one, every stored budget is listed
/// against its own month.
pub fn budget_rows(conn: &Connection, user: &str, month: Option<&str>) -> Result<Vec<Budget>> {
    let mut budgets = Vec::new();
    match month {
        Some(month) => {
            let mut stmt = conn.prepare(
                "SELECT id, name, month, planned, is_recurring, pattern FROM budgets
                 WHERE user_id=?1 AND (month=?2 OR (is_recurring=1 AND month<?2))
                 ORDER BY name, month DESC",
            )?;
            let mut cur = stmt.query(params![user, month])?;
            while let Some(r) = cur.next()? {
                let name: String = r.get(1)?;
                if budgets.last().is_some_and(|b: &Budget| b.name == name) {
                    continue;
                }
                budgets.push(read_budget(r, name, month.to_string())?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, name, month, planned, is_recurring, pattern FROM budgets
                 WHERE user_id=?1 ORDER BY month DESC, name",
            )?;
            let mut cur = stmt.query(params![user])?;
            while let Some(r) = cur.next()? {
                let name: String = r.get(1)?;
                let own_month: String = r.get(2)?;
                budgets.push(read_budget(r, name, own_month)?);
            }
        }
    }

    for b in &mut budgets {
        b.spent = spent_for(conn, user, b)?;
    }
    Ok(budgets)
}

fn read_budget(r: &rusqlite::Row<'_>, name: String, month: String) -> Result<Budget> {
    let planned: String = r.get(3)?;
    Ok(Budget {
        id: r.get(0)?,
        name,
        month,
        planned: stored_decimal(&planned)?,
        spent: Decimal::ZERO,
        is_recurring: r.get(4)?,
        pattern: r.get(5)?,
    })
}

fn spent_for(conn: &Connection, user: &str, budget: &Budget) -> Result<Decimal> {
    let re = budget
        .pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .map_err(|err| anyhow!("Invalid stored pattern for budget '{}': {}", budget.name, err))?;

    let mut stmt = conn.prepare(
        "SELECT type, description, amount FROM transactions
         WHERE user_id=?1 AND category='expense' AND substr(date,1,7)=?2",
    )?;
    let mut cur = stmt.query(params![user, budget.month])?;
    let mut spent = Decimal::ZERO;
    while let Some(r) = cur.next()? {
        let kind: String = r.get(0)?;
        let description: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let by_type = kind.trim().to_lowercase() == budget.name.to_lowercase();
        let by_pattern = re.as_ref().is_some_and(|re| re.is_match(&description));
        if by_type || by_pattern {
            spent += stored_decimal(&amount)?;
        }
    }
    Ok(spent)
}
