// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CanonicalRow;
use crate::normalize::Normalizer;
use crate::utils::{load_profile, parse_user};
use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use std::fs;
use tracing::info;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let user = parse_user(m.get_one::<String>("user").unwrap())?;
    let path = m.get_one::<String>("path").unwrap().trim();
    let replace = m.get_flag("replace");
    let normalizer = Normalizer::new(load_profile(m.get_one::<String>("profile"))?);

    let bytes = fs::read(path).with_context(|| format!("Open statement {}", path))?;
    let rows = normalizer
        .normalize_bytes(&bytes)
        .with_context(|| format!("Normalize statement {}", path))?;

    let inserted = insert_rows(conn, &user, &rows, replace)?;
    info!(user = %user, path, inserted, replace, "statement imported");
    println!("Imported {} transactions for '{}' from {}", inserted, user, path);
    Ok(())
}

/// Stores canonical rows for `user` in one transaction, optionally replacing what
/// was there before.
pub fn insert_rows(
    conn: &mut Connection,
    user: &str,
    rows: &[CanonicalRow],
    replace: bool,
) -> Result<usize> {
    let tx = conn.transaction()?;
    if replace {
        tx.execute("DELETE FROM transactions WHERE user_id=?1", params![user])?;
    }
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions(user_id, date, type, category, amount, description) \
             VALUES (?1,?2,?3,?4,?5,?6)",
        )?;
        for r in rows {
            stmt.execute(params![
                user,
                r.date.to_string(),
                r.r#type,
                r.category.as_str(),
                r.amount.to_string(),
                r.description.as_deref().unwrap_or_default(),
            ])?;
        }
    }
    tx.commit()?;
    Ok(rows.len())
}
