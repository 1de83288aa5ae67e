// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bank statement normalization.
//!
//! A raw export goes through a fixed sequence of steps: self-transfer filtering,
//! column pruning, renaming, required-field filtering, amount coercion, category and
//! amount derivation, date normalization and the final projection onto
//! [`CanonicalRow`]. Bad cells never fail the run; they are coerced or the row is
//! dropped. Only a table that cannot be read at all is an error.

pub mod coerce;
pub mod profile;
pub mod table;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{CanonicalRow, Category};
pub use profile::{ColumnMap, Encoding, StatementProfile};
pub use table::RawTable;

pub const DATE: &str = "date";
pub const EXPENSE: &str = "expense";
pub const INCOME: &str = "income";
pub const TYPE: &str = "type";
pub const DESCRIPTION: &str = "description";

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Input is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Delimiter '{0}' is not a single ASCII character")]
    InvalidDelimiter(char),
    #[error("Input has no header row")]
    MissingHeader,
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    profile: StatementProfile,
}

impl Normalizer {
    pub fn new(profile: StatementProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &StatementProfile {
        &self.profile
    }

    pub fn read(&self, bytes: &[u8]) -> Result<RawTable, NormalizeError> {
        RawTable::from_bytes(bytes, &self.profile)
    }

    /// Decodes and normalizes a raw export in one go.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Result<Vec<CanonicalRow>, NormalizeError> {
        let table = self.read(bytes)?;
        Ok(self.normalize(table))
    }

    pub fn normalize(&self, mut table: RawTable) -> Vec<CanonicalRow> {
        let input_rows = table.len();

        let self_transfers = self.drop_self_transfers(&mut table);
        let pruned = table.drop_columns(&self.profile.denylist);
        table.rename_columns(&self.profile.columns.renames());

        let Some(date_col) = table.column_index(DATE) else {
            warn!(
                profile = %self.profile.name,
                column = %self.profile.columns.date,
                "date column not found; no rows can be normalized"
            );
            return Vec::new();
        };
        let undated = table.retain_rows(|row| RawTable::cell(row, date_col).is_some());

        let expense_col = table.column_index(EXPENSE);
        let income_col = table.column_index(INCOME);
        let type_col = table.column_index(TYPE);
        let description_col = table.column_index(DESCRIPTION);

        let mut bad_dates = 0usize;
        let mut out = Vec::with_capacity(table.len());
        for row in table.rows() {
            let expense = amount_at(row, expense_col);
            let income = amount_at(row, income_col);
            let category = Category::from_income(income);
            let amount = match category {
                Category::Income => income,
                Category::Expense => expense.abs(),
            };

            let raw_date = RawTable::cell(row, date_col).unwrap_or_default();
            let Some(date) = coerce::parse_statement_date(raw_date, &self.profile.date_format)
            else {
                bad_dates += 1;
                continue;
            };

            let description = self
                .profile
                .include_description
                .then(|| text_at(row, description_col));

            out.push(CanonicalRow {
                date,
                r#type: text_at(row, type_col),
                category,
                amount,
                description,
            });
        }

        debug!(
            profile = %self.profile.name,
            input_rows,
            self_transfers,
            pruned_columns = pruned,
            undated,
            bad_dates,
            output_rows = out.len(),
            "normalized statement"
        );
        out
    }

    fn drop_self_transfers(&self, table: &mut RawTable) -> usize {
        let Some(col) = self
            .profile
            .columns
            .subtype
            .as_deref()
            .and_then(|name| table.column_index(name))
        else {
            return 0;
        };
        let marker = self.profile.self_transfer_marker.to_lowercase();
        table.retain_rows(|row| {
            RawTable::cell(row, col).is_none_or(|v| v.to_lowercase() != marker)
        })
    }
}

fn amount_at(row: &[String], col: Option<usize>) -> Decimal {
    coerce::coerce_amount(col.and_then(|c| RawTable::cell(row, c)))
}

/// The cell as exported; only a blank cell or an absent column becomes `""`.
fn text_at(row: &[String], col: Option<usize>) -> String {
    col.and_then(|c| RawTable::cell(row, c).and(row.get(c)))
        .cloned()
        .unwrap_or_default()
}
