// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use budgetmaster::models::{CanonicalRow, Category};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;

pub fn conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    budgetmaster::db::init_schema(&mut conn).unwrap();
    conn
}

pub fn row(date: &str, kind: &str, category: Category, amount: &str, desc: &str) -> CanonicalRow {
    CanonicalRow {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        r#type: kind.to_string(),
        category,
        amount: Decimal::from_str(amount).unwrap(),
        description: Some(desc.to_string()),
    }
}

/// Writes a Latin-1 encoded statement the way the bank exports it.
pub fn latin1_statement(text: &str) -> NamedTempFile {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap())
        .collect();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    file.flush().unwrap();
    file
}

pub const APRIL: &str = "Utført dato;Beløp inn;Beløp ut;Type;Undertype;Beskrivelse;Fra konto
03.04.2025;;150,00;food;Varekjøp;kiwi;1234.56.78901
05.04.2025;35000;;salary;Lønn;;
06.04.2025;;2000,00;transfer;Overføring til egen konto;sparing;1234.56.78901
07.04.2025;;89,90;food;Varekjøp;rema 1000;
31.13.2025;;10,00;food;Varekjøp;bad date;
";
