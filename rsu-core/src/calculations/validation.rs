//! Input validation for RSU vesting events.
//!
//! Every rule is checked independently so a front end can show all problems
//! at once instead of one per submission.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{CalculationInput, WithholdingKind};

/// A single violated input rule.
///
/// The `Display` text is the user-facing message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("VCD price must be positive")]
    NonPositiveVcdPrice,

    #[error("Vest day price must be positive")]
    NonPositiveVestDayPrice,

    #[error("Tax sale price must be positive")]
    NonPositiveTaxSalePrice,

    #[error("Vesting shares must be positive")]
    NonPositiveVestingShares,

    #[error("Shares sold for taxes cannot be negative")]
    NegativeSharesSoldForTaxes,

    #[error("Shares sold for taxes cannot exceed vesting shares")]
    SharesSoldExceedVestingShares,

    /// A withholding rate fell outside `[0, 1]`.
    #[error("{0} rate must be between 0 and 1")]
    RateOutOfRange(WithholdingKind),

    #[error("Total tax rate cannot exceed 100%")]
    TotalTaxRateExceedsOne,
}

impl CalculationInput {
    /// Checks every input rule and returns all violations, in a stable order.
    ///
    /// An empty vector means the input is safe to price.
    pub fn validate(&self) -> Vec<InputError> {
        let mut errors = Vec::new();

        if self.vcd_price <= Decimal::ZERO {
            errors.push(InputError::NonPositiveVcdPrice);
        }
        if self.vest_day_price <= Decimal::ZERO {
            errors.push(InputError::NonPositiveVestDayPrice);
        }
        if self.tax_sale_price <= Decimal::ZERO {
            errors.push(InputError::NonPositiveTaxSalePrice);
        }

        if self.vesting_shares <= 0 {
            errors.push(InputError::NonPositiveVestingShares);
        }
        if self.shares_sold_for_taxes < 0 {
            errors.push(InputError::NegativeSharesSoldForTaxes);
        }
        if self.shares_sold_for_taxes > self.vesting_shares {
            errors.push(InputError::SharesSoldExceedVestingShares);
        }

        errors.extend(
            WithholdingKind::ALL
                .into_iter()
                .filter(|kind| !is_fraction(kind.rate(self)))
                .map(InputError::RateOutOfRange),
        );

        if self.total_tax_rate().is_none_or(|rate| rate > Decimal::ONE) {
            errors.push(InputError::TotalTaxRateExceedsOne);
        }

        errors
    }
}

/// Validates a vesting event and returns the user-facing message of every
/// violated rule. An empty list means the input is valid.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use rsu_core::CalculationInput;
/// use rsu_core::calculations::validate_inputs;
///
/// let input = CalculationInput {
///     vcd_price: dec!(-100.00),
///     vesting_shares: 100,
///     vest_day_price: dec!(120.00),
///     medicare_rate: dec!(0.0145),
///     social_security_rate: dec!(0.062),
///     federal_rate: dec!(0.22),
///     salt_rate: dec!(0.05),
///     shares_sold_for_taxes: 25,
///     tax_sale_price: dec!(120.00),
///     include_capital_gains: false,
///     include_net_investment_tax: false,
/// };
///
/// assert_eq!(validate_inputs(&input), vec!["VCD price must be positive"]);
/// ```
pub fn validate_inputs(input: &CalculationInput) -> Vec<String> {
    input
        .validate()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn is_fraction(rate: Decimal) -> bool {
    (Decimal::ZERO..=Decimal::ONE).contains(&rate)
}
