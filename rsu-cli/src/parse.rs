use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// currency symbols and commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace([',', '$'], "")
}

/// Parses a price or amount into a [`Decimal`].
///
/// Handles a leading `$` and comma thousands separators (e.g. `"$1,234.56"`).
/// Empty or whitespace-only input is treated as 0 so that the input
/// validator, not the parser, reports the missing value.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a tax rate given either as a fraction (`"0.22"`) or as a
/// percentage (`"22%"`). Both produce `0.22`.
pub fn parse_rate(s: &str) -> Result<Decimal, ParseDecimalError> {
    match s.trim().strip_suffix('%') {
        Some(percent) => {
            parse_decimal(percent).map(|value| value / Decimal::ONE_HUNDRED)
        }
        None => parse_decimal(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_decimal_accepts_dollar_sign() {
        assert_eq!(parse_decimal("$1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("-$100").unwrap(), dec!(-100));
    }

    #[test]
    fn parse_decimal_keeps_negative_values() {
        assert_eq!(parse_decimal("-100.00").unwrap(), dec!(-100.00));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        let error = parse_decimal("abc").unwrap_err();

        assert!(error.to_string().starts_with("invalid decimal 'abc'"));
    }

    #[test]
    fn parse_rate_accepts_fractions() {
        assert_eq!(parse_rate("0.0145").unwrap(), dec!(0.0145));
    }

    #[test]
    fn parse_rate_accepts_percentages() {
        assert_eq!(parse_rate("22%").unwrap(), dec!(0.22));
        assert_eq!(parse_rate(" 1.45% ").unwrap(), dec!(0.0145));
        assert_eq!(parse_rate("3.8%").unwrap(), dec!(0.038));
    }

    #[test]
    fn parse_rate_rejects_garbage_before_percent() {
        assert!(parse_rate("twenty%").is_err());
    }
}
