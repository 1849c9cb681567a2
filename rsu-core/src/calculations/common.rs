//! Common utility functions for RSU calculations.
//!
//! This module provides the currency rounding shared by the pricing engine
//! and the scenario analysis.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using banker's rounding.
///
/// Values at exactly the midpoint are rounded to the nearest even cent, so
/// `0.125` becomes `0.12` while `0.135` becomes `0.14`. Payroll withholding
/// lines are rounded this way before they are summed.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use rsu_core::calculations::common::round_currency;
///
/// assert_eq!(round_currency(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_currency(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_currency(dec!(123.465)), dec!(123.46));
/// assert_eq!(round_currency(dec!(-123.465)), dec!(-123.46));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_currency_rounds_down_below_midpoint() {
        let result = round_currency(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_currency_rounds_up_above_midpoint() {
        let result = round_currency(dec!(123.456));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_currency_rounds_midpoint_to_even_cent() {
        assert_eq!(round_currency(dec!(0.125)), dec!(0.12));
        assert_eq!(round_currency(dec!(0.135)), dec!(0.14));
        assert_eq!(round_currency(dec!(217.505)), dec!(217.50));
    }

    #[test]
    fn round_currency_handles_negative_midpoints() {
        assert_eq!(round_currency(dec!(-0.125)), dec!(-0.12));
        assert_eq!(round_currency(dec!(-0.135)), dec!(-0.14));
    }

    #[test]
    fn round_currency_preserves_already_rounded_values() {
        let result = round_currency(dec!(123.45));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_currency_handles_zero() {
        let result = round_currency(dec!(0));

        assert_eq!(result, dec!(0.00));
    }

    #[test]
    fn round_currency_handles_long_quotients() {
        // 7307 / 75
        let result = round_currency(dec!(7307) / dec!(75));

        assert_eq!(result, dec!(97.43));
    }
}
