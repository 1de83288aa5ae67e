// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::exporter::{OutputFormat, write_stdout, write_to_path};
use crate::normalize::Normalizer;
use crate::utils::load_profile;
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

/// Normalizes a statement and writes the result to `--out` or stdout; nothing is
/// stored and no shared output file is touched.
pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let fmt = OutputFormat::parse(m.get_one::<String>("format").unwrap())?;
    let normalizer = Normalizer::new(load_profile(m.get_one::<String>("profile"))?);
    let include_description = normalizer.profile().include_description;

    let bytes = fs::read(path).with_context(|| format!("Open statement {}", path))?;
    let rows = normalizer
        .normalize_bytes(&bytes)
        .with_context(|| format!("Normalize statement {}", path))?;

    match m.get_one::<String>("out").map(|s| s.trim()) {
        Some(out) => {
            write_to_path(out, fmt, &rows, include_description)?;
            info!(path, out, rows = rows.len(), "cleaned statement written");
            eprintln!("Cleaned {} rows from {} into {}", rows.len(), path, out);
        }
        None => write_stdout(fmt, &rows, include_description)?,
    }
    Ok(())
}
