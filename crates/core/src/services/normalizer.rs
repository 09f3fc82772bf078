//! Total parsing of raw form text.
//!
//! Every function here maps any input to a definite, finite, non-negative
//! number. Malformed text degrades to `0` instead of failing, which keeps a
//! half-filled form usable while the user is still typing.

use crate::models::form::NumberMode;

/// Parse currency-formatted text such as `Rp 5.000` into integer units.
///
/// Every character that is not an ASCII digit is dropped before parsing.
/// Empty or digit-free text yields `0`; values beyond `u64::MAX` saturate.
#[must_use]
pub fn parse_currency(text: &str) -> u64 {
    text.chars()
        .filter(|c| c.is_ascii_digit())
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c as u8 - b'0'))
        })
}

/// Parse plain numeric text such as `10` or `0.15`.
///
/// Surrounding whitespace is ignored and empty text is `0`. Unparsable,
/// non-finite and negative values all yield `0`.
#[must_use]
pub fn parse_plain(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Read a field's text according to its mode.
#[must_use]
pub fn read_number(text: &str, mode: NumberMode) -> f64 {
    match mode {
        NumberMode::Currency => parse_currency(text) as f64,
        NumberMode::Plain => parse_plain(text),
    }
}

/// Map `inf` and `NaN` to `0`, leaving finite values untouched.
///
/// Calculator outputs pass through this so that every persisted result is a
/// finite JSON number.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
