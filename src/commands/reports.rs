// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, MonthSummary};
use crate::utils::{maybe_print_json, parse_month, parse_user, pretty_table, stored_decimal};
use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = parse_user(sub.get_one::<String>("user").unwrap())?;
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;

    let s = month_summary(conn, &user, &month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec!["Income".to_string(), format!("{:.2}", s.total_income), s.income_count.to_string()],
            vec!["Expenses".to_string(), format!("{:.2}", s.total_expenses), s.expense_count.to_string()],
            vec!["Net".to_string(), format!("{:.2}", s.net), String::new()],
        ];
        println!("{}", pretty_table(&[s.month.as_str(), "Total", "Count"], rows));
    }
    Ok(())
}

pub fn month_summary(conn: &Connection, user: &str, month: &str) -> Result<MonthSummary> {
    let mut stmt = conn.prepare(
        "SELECT category, amount FROM transactions WHERE user_id=?1 AND substr(date,1,7)=?2",
    )?;
    let mut cur = stmt.query(params![user, month])?;

    let mut s = MonthSummary {
        month: month.to_string(),
        total_income: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        net: Decimal::ZERO,
        income_count: 0,
        expense_count: 0,
    };
    while let Some(r) = cur.next()? {
        let category: String = r.get(0)?;
        let amount: String = r.get(1)?;
        let amount = stored_decimal(&amount)?;
        match category.parse::<Category>()? {
            Category::Income => {
                s.total_income += amount;
                s.income_count += 1;
            }
            Category::Expense => {
                s.total_expenses += amount;
                s.expense_count += 1;
            }
        }
    }
    s.net = s.total_income - s.total_expenses;
    Ok(s)
}
