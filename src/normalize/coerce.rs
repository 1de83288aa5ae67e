// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses statement amounts such as `150`, `150,00`, `1 234,56` or `1.234,56`.
///
/// Whichever of `,`/`.` comes last is the decimal separator; the other one is
/// treated as a thousands separator. Whitespace (including NBSP) is ignored.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replace(',', "."),
        _ => cleaned,
    };
    Decimal::from_str(&normalized).ok()
}

/// Blank or unparseable amounts count as zero.
pub fn coerce_amount(raw: Option<&str>) -> Decimal {
    raw.and_then(parse_amount).unwrap_or(Decimal::ZERO)
}

/// Parses a statement date with the profile format.
///
/// chrono reads `%Y` greedily at any width, so `03.04.25` would become year 25. A `%Y`
/// field must be exactly four digits in the raw cell.
pub fn parse_statement_date(raw: &str, format: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !four_digit_year(raw, format) {
        return None;
    }
    NaiveDate::parse_from_str(raw, format).ok()
}

/// Numeric fields chrono may read from a date cell, in format order.
const NUMERIC_SPECIFIERS: &[char] = &['d', 'e', 'm', 'Y', 'y', 'j'];

fn four_digit_year(raw: &str, format: &str) -> bool {
    let specifiers: Vec<char> = format
        .split('%')
        .skip(1)
        .filter_map(|piece| piece.chars().next())
        .filter(|c| NUMERIC_SPECIFIERS.contains(c))
        .collect();
    let Some(year_at) = specifiers.iter().position(|&c| c == 'Y') else {
        return true;
    };
    raw.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .nth(year_at)
        .is_some_and(|run| run.len() == 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ── parse_amount ──────────────────────────────────────────────────────────

    #[test]
    fn parse_amount_plain() {
        assert_eq!(parse_amount("35000"), Some(dec("35000")));
        assert_eq!(parse_amount("12.50"), Some(dec("12.5")));
    }

    #[test]
    fn parse_amount_decimal_comma() {
        assert_eq!(parse_amount("150,00"), Some(dec("150")));
        assert_eq!(parse_amount("-89,90"), Some(dec("-89.9")));
    }

    #[test]
    fn parse_amount_thousands_separators() {
        assert_eq!(parse_amount("1 234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1\u{a0}234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1.234,56"), Some(dec("1234.56")));
        assert_eq!(parse_amount("1,234.56"), Some(dec("1234.56")));
    }

    #[test]
    fn parse_amount_rejects_text() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("12,34,56"), None);
    }

    #[test]
    fn coerce_amount_defaults_to_zero() {
        assert_eq!(coerce_amount(None), Decimal::ZERO);
        assert_eq!(coerce_amount(Some("n/a")), Decimal::ZERO);
        assert_eq!(coerce_amount(Some("7,5")), dec("7.5"));
    }

    // ── parse_statement_date ──────────────────────────────────────────────────

    #[test]
    fn parse_date_day_month_year() {
        let d = parse_statement_date("03.04.2025", "%d.%m.%Y").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 4, 3).unwrap());
    }

    #[test]
    fn parse_date_unpadded_and_padded_whitespace() {
        let d = parse_statement_date(" 3.4.2025 ", "%d.%m.%Y").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 4, 3).unwrap());
    }

    #[test]
    fn parse_date_invalid() {
        assert!(parse_statement_date("31.13.2025", "%d.%m.%Y").is_none());
        assert!(parse_statement_date("30.02.2025", "%d.%m.%Y").is_none());
        assert!(parse_statement_date("2025-04-03", "%d.%m.%Y").is_none());
        assert!(parse_statement_date("03.04.25", "%d.%m.%Y").is_none());
        assert!(parse_statement_date("03.04.20250", "%d.%m.%Y").is_none());
    }

    #[test]
    fn parse_date_year_first_formats() {
        let d = parse_statement_date("2025-04-03", "%Y-%m-%d").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 4, 3).unwrap());
        assert!(parse_statement_date("25-04-03", "%Y-%m-%d").is_none());
    }
}
