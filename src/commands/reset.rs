// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::parse_user;
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetCounts {
    pub transactions: usize,
    pub budgets: usize,
    pub savings_goals: usize,
}

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = parse_user(m.get_one::<String>("user").unwrap())?;
    let c = reset_user(conn, &user)?;
    println!(
        "Reset '{}': removed {} transactions, {} budgets, {} savings goals",
        user, c.transactions, c.budgets, c.savings_goals
    );
    Ok(())
}

/// Removes everything stored for `user`, all or nothing.
pub fn reset_user(conn: &mut Connection, user: &str) -> Result<ResetCounts> {
    let tx = conn.transaction()?;
    let counts = ResetCounts {
        transactions: tx.execute("DELETE FROM transactions WHERE user_id=?1", params![user])?,
        budgets: tx.execute("DELETE FROM budgets WHERE user_id=?1", params![user])?,
        savings_goals: tx.execute("DELETE FROM savings_goals WHERE user_id=?1", params![user])?,
    };
    tx.commit()?;
    info!(
        user,
        transactions = counts.transactions,
        budgets = counts.budgets,
        savings_goals = counts.savings_goals,
        "user data reset"
    );
    Ok(counts)
}
