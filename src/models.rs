// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Income/expense split derived from the statement amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Income,
    Expense,
}

impl Category {
    /// Strictly positive income makes a row income; everything else is an expense.
    pub fn from_income(income: Decimal) -> Self {
        if income > Decimal::ZERO {
            Category::Income
        } else {
            Category::Expense
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Expense => "expense",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Category::Income),
            "expense" => Ok(Category::Expense),
            other => Err(anyhow!("Invalid category '{}', expected income|expense", other)),
        }
    }
}

/// One normalized transaction, in the fixed output column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    pub date: NaiveDate,
    pub r#type: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A canonical row as kept in the ledger for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub r#type: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub description: String,
    pub created_at: String,
}

impl From<StoredTransaction> for CanonicalRow {
    fn from(t: StoredTransaction) -> Self {
        CanonicalRow {
            date: t.date,
            r#type: t.r#type,
            category: t.category,
            amount: t.amount,
            description: Some(t.description),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub name: String,
    pub month: String, // YYYY-MM
    pub planned: Decimal,
    pub spent: Decimal,
    pub is_recurring: bool,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    pub saved: Decimal,
    pub deadline: NaiveDate,
}

impl SavingsGoal {
    pub fn progress_pct(&self) -> Decimal {
        if self.target.is_zero() {
            return Decimal::ZERO;
        }
        (self.saved / self.target * Decimal::ONE_HUNDRED).round_dp(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net: Decimal,
    pub income_count: usize,
    pub expense_count: usize,
}
