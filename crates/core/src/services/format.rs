//! Indonesian (`id-ID`) number and rupiah formatting.
//!
//! Rounding is half away from zero at every precision.

/// Prefix of every rupiah amount.
pub const CURRENCY_PREFIX: &str = "Rp";

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Fraction digits of an IDR currency amount.
const CURRENCY_FRACTION_DIGITS: u32 = 2;

/// Upper bound on requested fraction digits; `10^20` still fits a `u128`
/// with room for the integer part.
pub const MAX_FRACTION_DIGITS: u32 = 20;

/// A value rounded to a fixed number of fraction digits, split into parts.
struct Rounded {
    negative: bool,
    integer: u128,
    fraction: u128,
    digits: u32,
}

fn round_parts(value: f64, digits: u32) -> Rounded {
    let digits = digits.min(MAX_FRACTION_DIGITS);
    if !value.is_finite() {
        return Rounded {
            negative: false,
            integer: 0,
            fraction: 0,
            digits,
        };
    }
    let scale = 10u128.pow(digits);
    let units = (value.abs() * scale as f64).round() as u128;
    Rounded {
        negative: value < 0.0 && units != 0,
        integer: units / scale,
        fraction: units % scale,
        digits,
    }
}

/// Group an integer with `.` every three digits: `1234567` → `1.234.567`.
#[must_use]
pub fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Format a number with at most `max_fraction_digits` decimals, dropping
/// trailing zeros: `4666.6666` with 2 digits → `4.666,67`, `15.0` → `15`.
/// Precision beyond [`MAX_FRACTION_DIGITS`] is clamped.
#[must_use]
pub fn format_number(value: f64, max_fraction_digits: u32) -> String {
    let r = round_parts(value, max_fraction_digits);
    let mut out = String::new();
    if r.negative {
        out.push('-');
    }
    out.push_str(&group_thousands(r.integer));
    if r.fraction > 0 {
        let padded = format!("{:0width$}", r.fraction, width = r.digits as usize);
        out.push(DECIMAL_SEPARATOR);
        out.push_str(padded.trim_end_matches('0'));
    }
    out
}

/// Display text of a currency input field: `Rp 5.000`, or empty for `0`.
#[must_use]
pub fn format_rupiah_input(value: u64) -> String {
    if value == 0 {
        return String::new();
    }
    format!("{CURRENCY_PREFIX} {}", group_thousands(u128::from(value)))
}

/// Full rupiah amount with two decimals: `Rp 7.000.000,00`, `-Rp 1.500,00`.
#[must_use]
pub fn format_idr(value: f64) -> String {
    let r = round_parts(value, CURRENCY_FRACTION_DIGITS);
    format!(
        "{}{CURRENCY_PREFIX} {}{DECIMAL_SEPARATOR}{:02}",
        if r.negative { "-" } else { "" },
        group_thousands(r.integer),
        r.fraction,
    )
}
