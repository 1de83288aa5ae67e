// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use budgetmaster::commands::savings;
use chrono::NaiveDate;
use common::conn;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn funding_accumulates_and_reports_progress() {
    let mut conn = conn();
    let deadline = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
    savings::add_goal(&conn, "alice", "Ferie", dec("10000"), deadline).unwrap();

    savings::fund_goal(&mut conn, "alice", "Ferie", dec("1500")).unwrap();
    let goal = savings::fund_goal(&mut conn, "alice", "Ferie", dec("1000")).unwrap();
    assert_eq!(goal.saved, dec("2500"));
    assert_eq!(goal.progress_pct(), dec("25"));

    let goals = savings::list_goals(&conn, "alice").unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].saved, dec("2500"));
    assert_eq!(goals[0].deadline, deadline);
}

#[test]
fn funding_unknown_goal_or_bad_amount_fails() {
    let mut conn = conn();
    let deadline = NaiveDate::from_ymd_opt(2025, 12, 24).unwrap();
    savings::add_goal(&conn, "alice", "Bil", dec("50000"), deadline).unwrap();

    let err = savings::fund_goal(&mut conn, "bob", "Bil", dec("10")).unwrap_err();
    assert!(err.to_string().contains("not found"));
    assert!(savings::fund_goal(&mut conn, "alice", "Bil", dec("0")).is_err());
    assert!(savings::add_goal(&conn, "alice", "Bil", dec("1"), deadline).is_err());
}

#[test]
fn delete_goal_is_scoped_to_user() {
    let conn = conn();
    let deadline = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    savings::add_goal(&conn, "alice", "Hytte", dec("200000"), deadline).unwrap();
    savings::add_goal(&conn, "bob", "Hytte", dec("1000"), deadline).unwrap();

    let err = savings::delete_goal(&conn, "carol", "Hytte").unwrap_err();
    assert!(err.to_string().contains("not found"));

    savings::delete_goal(&conn, "alice", "Hytte").unwrap();
    assert!(savings::list_goals(&conn, "alice").unwrap().is_empty());
    assert_eq!(savings::list_goals(&conn, "bob").unwrap().len(), 1);
    assert!(savings::delete_goal(&conn, "alice", "Hytte").is_err());
}
