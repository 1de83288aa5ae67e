// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetmaster::commands::reset::{ResetCounts, reset_user};
use budgetmaster::commands::{budgets, importer, reports, savings};
use budgetmaster::models::Category;
use chrono::NaiveDate;
use common::{conn, row};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn seed(conn: &mut Connection, user: &str) {
    importer::insert_rows(
        conn,
        user,
        &[
            row("2025-04-01", "salary", Category::Income, "35000", ""),
            row("2025-04-02", "food", Category::Expense, "150.00", "kiwi"),
            row("2025-04-20", "rent", Category::Expense, "12000", ""),
            row("2025-05-01", "salary", Category::Income, "35000", ""),
        ],
        false,
    )
    .unwrap();
    budgets::set_budget(conn, user, "food", "2025-04", dec("4000"), true, None).unwrap();
    savings::add_goal(
        conn,
        user,
        "Ferie",
        dec("10000"),
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap(),
    )
    .unwrap();
}

#[test]
fn month_summary_totals() {
    let mut conn = conn();
    seed(&mut conn, "alice");
    let s = reports::month_summary(&conn, "alice", "2025-04").unwrap();
    assert_eq!(s.total_income, dec("35000"));
    assert_eq!(s.total_expenses, dec("12150"));
    assert_eq!(s.net, dec("22850"));
    assert_eq!((s.income_count, s.expense_count), (1, 2));
}

#[test]
fn reset_removes_only_that_users_data() {
    let mut conn = conn();
    seed(&mut conn, "alice");
    seed(&mut conn, "bob");

    let counts = reset_user(&mut conn, "alice").unwrap();
    assert_eq!(
        counts,
        ResetCounts {
            transactions: 4,
            budgets: 1,
            savings_goals: 1
        }
    );

    let remaining: i64 = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM transactions WHERE user_id='alice')
                  + (SELECT COUNT(*) FROM budgets WHERE user_id='alice')
                  + (SELECT COUNT(*) FROM savings_goals WHERE user_id='alice')",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(remaining, 0);

    let bob = reports::month_summary(&conn, "bob", "2025-04").unwrap();
    assert_eq!(bob.income_count + bob.expense_count, 3);
    assert_eq!(savings::list_goals(&conn, "bob").unwrap().len(), 1);

    assert_eq!(reset_user(&mut conn, "alice").unwrap(), ResetCounts::default());
}
