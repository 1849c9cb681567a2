//! Required sale price calculation for RSU sell-to-cover vesting events.
//!
//! When RSUs vest, payroll withholding is taken on the vest-day value of the
//! shares and an automatic sale covers it. This module answers: at what price
//! must the remaining shares be sold so the employee nets what they would
//! have netted had the vest-day price equaled the VCD price?
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross income at VCD price (vesting shares × VCD price) |
//! | 2    | Gross income at vest-day price (vesting shares × vest-day price) |
//! | 3    | Withholding lines, each rounded, on the vest-day gross income |
//! | 4    | Original net income target (VCD gross income less the total rate) |
//! | 5    | Shares remaining after the tax sale |
//! | 6    | Tax sale proceeds (shares sold × tax sale price) |
//! | 7    | Cash distribution (Step 6 - Step 3 total, may be negative) |
//! | 8    | Adjusted net income target (Step 4 - Step 7) |
//! | 9    | Required sale price (Step 8 / Step 5, zero when no shares remain) |
//! | 10   | Capital-gains gross-up when the price in Step 9 exceeds the vest-day price |
//! | 11   | Capital-gains tax and NIIT lines on the profit above the vest-day price |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use rsu_core::CalculationInput;
//! use rsu_core::calculations::calculate_required_sale_price;
//!
//! let input = CalculationInput {
//!     vcd_price: dec!(100.00),
//!     vesting_shares: 100,
//!     vest_day_price: dec!(80.00),
//!     medicare_rate: dec!(0.0145),
//!     social_security_rate: dec!(0.062),
//!     federal_rate: dec!(0.22),
//!     salt_rate: dec!(0.05),
//!     shares_sold_for_taxes: 25,
//!     tax_sale_price: dec!(80.00),
//!     include_capital_gains: true,
//!     include_net_investment_tax: false,
//! };
//!
//! let result = calculate_required_sale_price(&input).unwrap();
//!
//! assert_eq!(result.required_sale_price, dec!(103.87));
//! assert_eq!(result.capital_gains_tax, Some(dec!(483.41)));
//! assert_eq!(result.niit_tax, None);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::round_currency;
use crate::{CalculationInput, CalculationResult};

/// Statutory net investment income tax rate, 0.038 (3.8%).
pub const NIIT_RATE: Decimal = Decimal::from_parts(38, 0, 0, false, 3);

/// Errors that can occur while pricing a vesting event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The NIIT rate must be between 0 and 1.
    #[error("NIIT rate must be between 0 and 1, got {0}")]
    InvalidNiitRate(Decimal),

    /// Profit above the vest-day price would be taxed at 100% or more, so no
    /// sale price can reach the target.
    #[error("capital gains tax rate must be below 1 to price a profitable sale, got {0}")]
    CapitalGainsRateTooHigh(Decimal),

    /// An intermediate amount does not fit in a `Decimal`.
    #[error("calculation overflowed the supported decimal range")]
    Overflow,
}

/// Configuration parameters for the pricing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Surtax applied to capital gains when NIIT is enabled.
    pub niit_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            niit_rate: NIIT_RATE,
        }
    }
}

impl PricingConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidNiitRate`] if `niit_rate` is not in [0, 1].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use rsu_core::calculations::{PricingConfig, PricingError};
    ///
    /// let config = PricingConfig { niit_rate: dec!(1.2) };
    ///
    /// assert_eq!(config.validate(), Err(PricingError::InvalidNiitRate(dec!(1.2))));
    /// ```
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.niit_rate < Decimal::ZERO || self.niit_rate > Decimal::ONE {
            return Err(PricingError::InvalidNiitRate(self.niit_rate));
        }
        Ok(())
    }
}

/// Calculator for the required sale price of the shares left after a
/// sell-to-cover sale.
///
/// Inputs are expected to have passed [`CalculationInput::validate`]. The
/// engine still never panics: every step uses checked arithmetic and reports
/// [`PricingError::Overflow`] when an amount leaves the `Decimal` range.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Calculates every step of the required sale price for one vesting event.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if:
    /// - the configured NIIT rate is outside [0, 1]
    /// - capital gains are enabled, the sale would be profitable, and the
    ///   combined capital-gains rate is 1 or more
    /// - an intermediate value exceeds the `Decimal` range
    pub fn calculate(
        &self,
        input: &CalculationInput,
    ) -> Result<CalculationResult, PricingError> {
        self.config.validate()?;

        // Steps 1-2: Gross income under the baseline and actual prices
        let gross_income_vcd = self.gross_income(input.vesting_shares, input.vcd_price)?;
        let gross_income_vest_day = self.gross_income(input.vesting_shares, input.vest_day_price)?;

        // Step 3: Withholding on the actual vest-day income
        let federal_tax = self.withholding_tax(gross_income_vest_day, input.federal_rate)?;
        let social_security_tax =
            self.withholding_tax(gross_income_vest_day, input.social_security_rate)?;
        let medicare_tax = self.withholding_tax(gross_income_vest_day, input.medicare_rate)?;
        let salt_tax = self.withholding_tax(gross_income_vest_day, input.salt_rate)?;
        let total_withholding = [social_security_tax, medicare_tax, salt_tax]
            .into_iter()
            .try_fold(federal_tax, |sum, tax| checked(sum.checked_add(tax)))?;
        let total_tax_rate = checked(input.total_tax_rate())?;

        // Step 4: What the employee would have netted at the VCD price
        let original_net_income_target =
            self.original_net_income_target(gross_income_vcd, total_tax_rate)?;

        // Steps 5-7: Sell-to-cover outcome
        let shares_after_tax_sale = checked(input.shares_after_tax_sale())?;
        let tax_sale_proceeds =
            self.tax_sale_proceeds(input.shares_sold_for_taxes, input.tax_sale_price)?;
        let cash_distribution = self.cash_distribution(tax_sale_proceeds, total_withholding)?;

        // Step 8: Credit or debit the cash already settled by the tax sale
        let adjusted_net_income_target =
            checked(original_net_income_target.checked_sub(cash_distribution))?;

        // Step 9: Spread the remaining target across the remaining shares
        let break_even_price =
            self.break_even_price(adjusted_net_income_target, shares_after_tax_sale)?;

        // Step 10: Gross up for tax on any profit above the vest-day price
        let required_sale_price = if input.include_capital_gains {
            self.price_after_capital_gains(
                break_even_price,
                adjusted_net_income_target,
                shares_after_tax_sale,
                input,
            )?
        } else {
            break_even_price
        };

        // Step 11: Tax lines on that profit
        let (capital_gains_tax, niit_tax) =
            self.capital_gains_taxes(required_sale_price, shares_after_tax_sale, input)?;

        debug!(
            total_withholding = %total_withholding,
            cash_distribution = %cash_distribution,
            adjusted_net_income_target = %adjusted_net_income_target,
            required_sale_price = %required_sale_price,
            "Calculated required sale price"
        );

        Ok(CalculationResult {
            gross_income_vcd: round_currency(gross_income_vcd),
            gross_income_vest_day: round_currency(gross_income_vest_day),
            total_tax_rate,
            total_withholding,
            federal_tax,
            social_security_tax,
            medicare_tax,
            salt_tax,
            original_net_income_target: round_currency(original_net_income_target),
            shares_after_tax_sale,
            tax_sale_proceeds: round_currency(tax_sale_proceeds),
            cash_distribution,
            adjusted_net_income_target: round_currency(adjusted_net_income_target),
            required_sale_price: round_currency(required_sale_price),
            capital_gains_tax,
            niit_tax,
            input: input.clone(),
        })
    }

    /// Values a block of shares at a per-share price.
    fn gross_income(
        &self,
        shares: i64,
        price: Decimal,
    ) -> Result<Decimal, PricingError> {
        checked(Decimal::from(shares).checked_mul(price))
    }

    /// Calculates one withholding line, rounded to cents before it is summed.
    fn withholding_tax(
        &self,
        gross_income: Decimal,
        rate: Decimal,
    ) -> Result<Decimal, PricingError> {
        checked(gross_income.checked_mul(rate)).map(round_currency)
    }

    /// Calculates the net income had the shares vested at the VCD price.
    ///
    /// Left unrounded; the adjusted target is derived from it.
    fn original_net_income_target(
        &self,
        gross_income_vcd: Decimal,
        total_tax_rate: Decimal,
    ) -> Result<Decimal, PricingError> {
        let withheld = checked(gross_income_vcd.checked_mul(total_tax_rate))?;
        checked(gross_income_vcd.checked_sub(withheld))
    }

    fn tax_sale_proceeds(
        &self,
        shares_sold: i64,
        tax_sale_price: Decimal,
    ) -> Result<Decimal, PricingError> {
        checked(Decimal::from(shares_sold).checked_mul(tax_sale_price))
    }

    /// Calculates the cash left over (or still owed) after the tax sale pays
    /// the withholding.
    fn cash_distribution(
        &self,
        tax_sale_proceeds: Decimal,
        total_withholding: Decimal,
    ) -> Result<Decimal, PricingError> {
        checked(tax_sale_proceeds.checked_sub(total_withholding)).map(round_currency)
    }

    /// Calculates the per-share price that realizes the adjusted target,
    /// ignoring capital-gains tax.
    ///
    /// Returns zero when no shares remain to be sold.
    fn break_even_price(
        &self,
        adjusted_net_income_target: Decimal,
        shares_after_tax_sale: i64,
    ) -> Result<Decimal, PricingError> {
        if shares_after_tax_sale <= 0 {
            warn!(
                shares_after_tax_sale,
                "No shares remain after the tax sale; required sale price is zero"
            );
            return Ok(Decimal::ZERO);
        }

        checked(adjusted_net_income_target.checked_div(Decimal::from(shares_after_tax_sale)))
    }

    /// Combined rate on profit above the vest-day price.
    ///
    /// Short-term gains are taxed at the federal and SALT rates, plus NIIT
    /// when it is enabled.
    fn capital_gains_rate(
        &self,
        input: &CalculationInput,
    ) -> Result<Decimal, PricingError> {
        let rate = checked(input.federal_rate.checked_add(input.salt_rate))?;
        if input.include_net_investment_tax {
            checked(rate.checked_add(self.config.niit_rate))
        } else {
            Ok(rate)
        }
    }

    /// Raises the break-even price so that, after tax on the profit above the
    /// vest-day price, each share still nets the per-share target.
    ///
    /// Solves `target = P - (P - vest_day_price) × rate` for `P`. Prices at or
    /// below the vest-day price carry no gain and are returned unchanged.
    fn price_after_capital_gains(
        &self,
        break_even_price: Decimal,
        adjusted_net_income_target: Decimal,
        shares_after_tax_sale: i64,
        input: &CalculationInput,
    ) -> Result<Decimal, PricingError> {
        if shares_after_tax_sale <= 0 || break_even_price <= input.vest_day_price {
            return Ok(break_even_price);
        }

        let rate = self.capital_gains_rate(input)?;
        if rate >= Decimal::ONE {
            return Err(PricingError::CapitalGainsRateTooHigh(rate));
        }

        let target_net_per_share = checked(
            adjusted_net_income_target.checked_div(Decimal::from(shares_after_tax_sale)),
        )?;
        let untaxed_basis = checked(input.vest_day_price.checked_mul(rate))?;
        let numerator = checked(target_net_per_share.checked_sub(untaxed_basis))?;
        let kept_share_of_gain = checked(Decimal::ONE.checked_sub(rate))?;
        checked(numerator.checked_div(kept_share_of_gain))
    }

    /// Calculates the capital-gains tax and NIIT lines for a sale at `sale_price`.
    ///
    /// Both are `None` unless capital gains are enabled and the sale is
    /// above the vest-day price. NIIT is reported separately from the
    /// capital-gains tax.
    fn capital_gains_taxes(
        &self,
        sale_price: Decimal,
        shares_after_tax_sale: i64,
        input: &CalculationInput,
    ) -> Result<(Option<Decimal>, Option<Decimal>), PricingError> {
        if !input.include_capital_gains || sale_price <= input.vest_day_price {
            return Ok((None, None));
        }

        let profit_per_share = checked(sale_price.checked_sub(input.vest_day_price))?;
        let shares = Decimal::from(shares_after_tax_sale);
        let tax_on_profit = |rate: Decimal| {
            checked(
                profit_per_share
                    .checked_mul(rate)
                    .and_then(|per_share| per_share.checked_mul(shares)),
            )
            .map(round_currency)
        };

        let capital_gains_tax =
            tax_on_profit(checked(input.federal_rate.checked_add(input.salt_rate))?)?;
        let niit_tax = input
            .include_net_investment_tax
            .then(|| tax_on_profit(self.config.niit_rate))
            .transpose()?;

        Ok((Some(capital_gains_tax), niit_tax))
    }
}

/// Maps a failed checked operation to [`PricingError::Overflow`].
fn checked<T>(value: Option<T>) -> Result<T, PricingError> {
    value.ok_or(PricingError::Overflow)
}

/// Calculates the required sale price with the default configuration.
///
/// Callers are expected to run [`validate_inputs`](crate::calculations::validate_inputs)
/// first and stop on any error.
///
/// # Errors
///
/// Returns [`PricingError::CapitalGainsRateTooHigh`] when a profitable sale
/// would be taxed at a combined capital-gains rate of 1 or more.
pub fn calculate_required_sale_price(
    input: &CalculationInput
) -> Result<CalculationResult, PricingError> {
    PricingEngine::default().calculate(input)
}
