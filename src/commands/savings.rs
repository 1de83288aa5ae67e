// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SavingsGoal;
use crate::utils::{
    maybe_print_json, parse_date, parse_decimal, parse_user, pretty_table, stored_decimal,
};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = parse_user(sub.get_one::<String>("user").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap().trim();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            let deadline = parse_date(sub.get_one::<String>("deadline").unwrap())?;
            add_goal(conn, &user, name, target, deadline)?;
            println!("Added savings goal '{}' ({} by {})", name, target, deadline);
        }
        Some(("fund", sub)) => {
            let user = parse_user(sub.get_one::<String>("user").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap().trim();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let goal = fund_goal(conn, &user, name, amount)?;
            println!(
                "Goal '{}': {:.2} of {:.2} saved ({}%)",
                goal.name,
                goal.saved,
                goal.target,
                goal.progress_pct()
            );
        }
        Some(("delete", sub)) => {
            let user = parse_user(sub.get_one::<String>("user").unwrap())?;
            let name = sub.get_one::<String>("name").unwrap().trim();
            delete_goal(conn, &user, name)?;
            println!("Deleted savings goal '{}'", name);
        }
        Some(("list", sub)) => {
            let user = parse_user(sub.get_one::<String>("user").unwrap())?;
            let data = list_goals(conn, &user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|g| {
                        vec![
                            g.name.clone(),
                            format!("{:.2}", g.saved),
                            format!("{:.2}", g.target),
                            format!("{}%", g.progress_pct()),
                            g.deadline.to_string(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Goal", "Saved", "Target", "Progress", "Deadline"], rows)
                );
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn add_goal(
    conn: &Connection,
    user: &str,
    name: &str,
    target: Decimal,
    deadline: NaiveDate,
) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("Goal name must not be empty"));
    }
    if target <= Decimal::ZERO {
        return Err(anyhow!("Target must be positive"));
    }
    conn.execute(
        "INSERT INTO savings_goals(user_id, name, target, deadline) VALUES (?1,?2,?3,?4)",
        params![user, name, target.to_string(), deadline.to_string()],
    )
    .with_context(|| format!("Add savings goal '{}'", name))?;
    Ok(())
}

/// Adds `amount` to the goal's saved total; the read and the write share one transaction.
pub fn fund_goal(
    conn: &mut Connection,
    user: &str,
    name: &str,
    amount: Decimal,
) -> Result<SavingsGoal> {
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be positive"));
    }
    let tx = conn.transaction()?;
    let mut goal = find_goal(&tx, user, name)?
        .ok_or_else(|| anyhow!("Savings goal '{}' not found", name))?;
    goal.saved += amount;
    tx.execute(
        "UPDATE savings_goals SET saved=?1 WHERE id=?2",
        params![goal.saved.to_string(), goal.id],
    )?;
    tx.commit()?;
    Ok(goal)
}

pub fn delete_goal(conn: &Connection, user: &str, name: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM savings_goals WHERE user_id=?1 AND name=?2",
        params![user, name],
    )?;
    if n == 0 {
        return Err(anyhow!("Savings goal '{}' not found", name));
    }
    Ok(())
}

pub fn list_goals(conn: &Connection, user: &str) -> Result<Vec<SavingsGoal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target, saved, deadline FROM savings_goals
         WHERE user_id=?1 ORDER BY deadline, name",
    )?;
    let mut cur = stmt.query(params![user])?;
    let mut data = Vec::new();
    while let Some(r) = cur.next()? {
        data.push(read_goal(r)?);
    }
    Ok(data)
}

fn find_goal(conn: &Connection, user: &str, name: &str) -> Result<Option<SavingsGoal>> {
    let raw = conn
        .query_row(
            "SELECT id, name, target, saved, deadline FROM savings_goals
             WHERE user_id=?1 AND name=?2",
            params![user, name],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                ))
            },
        )
        .optional()?;
    raw.map(|(id, name, target, saved, deadline)| goal_from_parts(id, name, &target, &saved, &deadline))
        .transpose()
}

fn read_goal(r: &rusqlite::Row<'_>) -> Result<SavingsGoal> {
    let target: String = r.get(2)?;
    let saved: String = r.get(3)?;
    let deadline: String = r.get(4)?;
    goal_from_parts(r.get(0)?, r.get(1)?, &target, &saved, &deadline)
}

fn goal_from_parts(
    id: i64,
    name: String,
    target: &str,
    saved: &str,
    deadline: &str,
) -> Result<SavingsGoal> {
    Ok(SavingsGoal {
        id,
        name,
        target: stored_decimal(target)?,
        saved: stored_decimal(saved)?,
        deadline: parse_date(deadline)?,
    })
}
