// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use csv::ReaderBuilder;
use std::io::Read;

use super::NormalizeError;
use super::profile::{Encoding, StatementProfile};

/// An untyped export: header names plus string cells, row-aligned to the headers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// ISO-8859-1 maps every byte to the code point with the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, String::new());
                r
            })
            .collect();
        Self { headers, rows }
    }

    /// Builds a table from `(header, value)` pairs per row; handy for callers that
    /// already hold keyed records.
    pub fn from_records(headers: &[&str], records: &[&[(&str, &str)]]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = records
            .iter()
            .map(|rec| {
                headers
                    .iter()
                    .map(|h| {
                        rec.iter()
                            .find(|(k, _)| *k == h.as_str())
                            .map(|(_, v)| v.to_string())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        Self::new(headers, rows)
    }

    pub fn from_bytes(bytes: &[u8], profile: &StatementProfile) -> Result<Self, NormalizeError> {
        let delimiter = profile.delimiter_byte()?;
        let text = match profile.encoding {
            Encoding::Latin1 => decode_latin1(bytes),
            Encoding::Utf8 => String::from_utf8(bytes.to_vec())?,
        };
        Self::from_reader(text.as_bytes(), delimiter)
    }

    pub fn from_reader<R: Read>(rdr: R, delimiter: u8) -> Result<Self, NormalizeError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(rdr);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(NormalizeError::MissingHeader);
        }

        let mut rows = Vec::new();
        for result in rdr.records() {
            let rec = result?;
            rows.push(rec.iter().map(|s| s.to_string()).collect());
        }
        Ok(Self::new(headers, rows))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Missing and whitespace-only cells both read as `None`.
    pub fn cell(row: &[String], col: usize) -> Option<&str> {
        row.get(col).map(|s| s.trim()).filter(|s| !s.is_empty())
    }

    pub(crate) fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[String]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|r| keep(r));
        before - self.rows.len()
    }

    pub(crate) fn drop_columns(&mut self, names: &[String]) -> usize {
        let keep: Vec<bool> = self
            .headers
            .iter()
            .map(|h| !names.iter().any(|n| n == h))
            .collect();
        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped == 0 {
            return 0;
        }
        self.headers = retain_by_mask(std::mem::take(&mut self.headers), &keep);
        for row in &mut self.rows {
            *row = retain_by_mask(std::mem::take(row), &keep);
        }
        dropped
    }

    pub(crate) fn rename_columns(&mut self, renames: &[(&str, &str)]) {
        for header in &mut self.headers {
            if let Some((_, to)) = renames.iter().find(|(from, _)| *from == header.as_str()) {
                *header = to.to_string();
            }
        }
    }
}

fn retain_by_mask(values: Vec<String>, keep: &[bool]) -> Vec<String> {
    values
        .into_iter()
        .zip(keep)
        .filter_map(|(v, k)| k.then_some(v))
        .collect()
}
