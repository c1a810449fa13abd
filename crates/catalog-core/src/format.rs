//! Magnitude-string parsing and display formatting.
//!
//! Upstream platforms report counts as human-readable tokens ("7.2B", "150M",
//! "1,204,558"). Parsing is the only place where free text becomes a number;
//! everything downstream of it operates on already-validated values. The
//! formatting helpers are for the presentation boundary only and are never fed
//! back into arithmetic.

use crate::error::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Recognized magnitude suffixes and their power-of-ten multipliers.
const SUFFIXES: &[(char, u32)] = &[('B', 9), ('M', 6), ('K', 3)];

/// Parse a human-readable count token into an exact decimal value.
///
/// Thousands-separator commas are stripped, a trailing `K`/`M`/`B` (either
/// case) scales the numeric prefix by 1e3/1e6/1e9. Empty, non-numeric, and
/// negative tokens are rejected.
pub fn parse_count(raw: &str) -> Result<Decimal> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return Err(Error::parse(raw, "empty value"));
    }

    let (prefix, exponent) = split_suffix(&cleaned);
    let prefix = prefix.trim();
    if prefix.is_empty() {
        return Err(Error::parse(raw, "missing numeric prefix"));
    }

    let value =
        Decimal::from_str(prefix).map_err(|e| Error::parse(raw, e.to_string()))?;
    if value.is_sign_negative() {
        return Err(Error::parse(raw, "count cannot be negative"));
    }

    Ok(value * Decimal::from(10u64.pow(exponent)))
}

/// Parse a count token all the way down to a whole number of streams.
pub fn parse_stream_count(raw: &str) -> Result<u64> {
    let value = parse_count(raw)?;
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or_else(|| Error::parse(raw, "count out of range"))
}

/// Round to the nearest integer and insert thousands separators.
pub fn format_grouped(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i128()
        .unwrap_or(0);
    group_digits(rounded)
}

/// Render as millions with exactly two decimal digits, e.g. `3.25M`.
pub fn format_millions(value: Decimal) -> String {
    format!("{:.2}M", decimal_to_f64(value) / 1_000_000.0)
}

/// Render as billions with exactly two decimal digits, e.g. `7.20B`.
pub fn format_billions(value: Decimal) -> String {
    format!("{:.2}B", decimal_to_f64(value) / 1_000_000_000.0)
}

/// Pick the display magnitude for a large aggregate: billions at >= 1e9,
/// millions below.
pub fn format_magnitude(value: Decimal) -> String {
    if value >= Decimal::from(1_000_000_000_u64) {
        format_billions(value)
    } else {
        format_millions(value)
    }
}

fn split_suffix(token: &str) -> (&str, u32) {
    if let Some(last) = token.chars().last() {
        for &(suffix, exponent) in SUFFIXES {
            if last.eq_ignore_ascii_case(&suffix) {
                return (&token[..token.len() - last.len_utf8()], exponent);
            }
        }
    }
    (token, 0)
}

fn group_digits(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Convert Decimal to f64 for display formatting.
fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}
