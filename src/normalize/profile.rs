// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::NormalizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Latin1,
    Utf8,
}

/// Source header names that map onto the canonical fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub date: String,
    pub expense: String,
    pub income: String,
    pub r#type: String,
    pub description: String,
    /// Only used to spot self-transfers; `None` disables that filter.
    pub subtype: Option<String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: "Utført dato".to_string(),
            expense: "Beløp ut".to_string(),
            income: "Beløp inn".to_string(),
            r#type: "Type".to_string(),
            description: "Beskrivelse".to_string(),
            subtype: Some("Undertype".to_string()),
        }
    }
}

impl ColumnMap {
    /// (source, canonical) pairs applied by the rename step.
    pub fn renames(&self) -> Vec<(&str, &str)> {
        vec![
            (self.date.as_str(), super::DATE),
            (self.expense.as_str(), super::EXPENSE),
            (self.income.as_str(), super::INCOME),
            (self.r#type.as_str(), super::TYPE),
            (self.description.as_str(), super::DESCRIPTION),
        ]
    }
}

/// Everything that describes one bank's export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementProfile {
    pub name: String,
    pub encoding: Encoding,
    pub delimiter: char,
    pub date_format: String,
    pub self_transfer_marker: String,
    pub include_description: bool,
    pub denylist: Vec<String>,
    pub columns: ColumnMap,
}

impl Default for StatementProfile {
    fn default() -> Self {
        Self {
            name: "no-bank".to_string(),
            encoding: Encoding::Latin1,
            delimiter: ';',
            date_format: "%d.%m.%Y".to_string(),
            self_transfer_marker: "Overføring til egen konto".to_string(),
            include_description: true,
            denylist: [
                "Bokført dato",
                "Rentedato",
                "Fra konto",
                "Undertype",
                "Avsender",
                "Til konto",
                "Mottakernavn",
                "Valuta",
                "Status",
                "Melding/KID/Fakt.nr",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            columns: ColumnMap::default(),
        }
    }
}

impl StatementProfile {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let profile: StatementProfile = toml::from_str(s).context("Invalid statement profile")?;
        profile.delimiter_byte()?;
        Ok(profile)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read profile {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("Load profile {}", path.display()))
    }

    pub fn delimiter_byte(&self) -> Result<u8, NormalizeError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(NormalizeError::InvalidDelimiter(self.delimiter))
        }
    }
}
