//! Display formatting for currency amounts and rates.

use rsu_core::calculations::common::round_currency;
use rust_decimal::Decimal;

/// Formats an amount as dollars with comma grouping, e.g. `$1,234.56`.
///
/// Negative amounts carry the sign before the symbol (`-$965.00`). Values
/// are rounded to cents with banker's rounding first.
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = round_currency(value);
    rounded.rescale(2);

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats an optional amount, using "—" when `None`.
pub fn format_optional_currency(value: Option<Decimal>) -> String {
    value
        .map(format_currency)
        .unwrap_or_else(|| "—".to_string())
}

/// Formats a fractional rate as a percentage with two places, e.g. `34.65%`.
pub fn format_percentage(rate: Decimal) -> String {
    let mut percent = round_currency(rate * Decimal::ONE_HUNDRED);
    percent.rescale(2);
    format!("{percent}%")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
