//! Side-by-side price scenarios and a sell-or-wait recommendation.
//!
//! Shows how much of the required sale price comes from capital-gains tax
//! and how much from the NIIT surcharge, by re-pricing the same vesting event
//! with those options switched off.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::pricing::{PricingEngine, PricingError};
use crate::{CalculationInput, CalculationResult};

/// Required sale prices for the same vesting event under progressively more
/// of the capital-gains options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceScenarios {
    /// Price with capital-gains tax ignored.
    pub without_capital_gains: Decimal,

    /// Price with capital-gains tax but no NIIT. `None` unless the input
    /// enables capital gains.
    pub with_capital_gains: Option<Decimal>,

    /// Price with capital-gains tax and NIIT. `None` unless the input enables
    /// both.
    pub with_capital_gains_and_niit: Option<Decimal>,
}

impl PriceScenarios {
    /// Prices `input` once per applicable scenario.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if any scenario fails to price.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use rsu_core::CalculationInput;
    /// use rsu_core::calculations::{PriceScenarios, PricingEngine};
    ///
    /// let input = CalculationInput {
    ///     vcd_price: dec!(100.00),
    ///     vesting_shares: 100,
    ///     vest_day_price: dec!(80.00),
    ///     medicare_rate: dec!(0.0145),
    ///     social_security_rate: dec!(0.062),
    ///     federal_rate: dec!(0.22),
    ///     salt_rate: dec!(0.05),
    ///     shares_sold_for_taxes: 25,
    ///     tax_sale_price: dec!(80.00),
    ///     include_capital_gains: true,
    ///     include_net_investment_tax: true,
    /// };
    ///
    /// let scenarios = PriceScenarios::compare(&PricingEngine::default(), &input).unwrap();
    ///
    /// assert_eq!(scenarios.without_capital_gains, dec!(97.43));
    /// assert_eq!(scenarios.with_capital_gains, Some(dec!(103.87)));
    /// assert_eq!(scenarios.with_capital_gains_and_niit, Some(dec!(105.18)));
    /// ```
    pub fn compare(
        engine: &PricingEngine,
        input: &CalculationInput,
    ) -> Result<Self, PricingError> {
        let price_with = |include_capital_gains: bool, include_net_investment_tax: bool| {
            let scenario = CalculationInput {
                include_capital_gains,
                include_net_investment_tax,
                ..input.clone()
            };
            engine
                .calculate(&scenario)
                .map(|result| result.required_sale_price)
        };

        let without_capital_gains = price_with(false, false)?;
        let with_capital_gains = input
            .include_capital_gains
            .then(|| price_with(true, false))
            .transpose()?;
        let with_capital_gains_and_niit = (input.include_capital_gains
            && input.include_net_investment_tax)
            .then(|| price_with(true, true))
            .transpose()?;

        Ok(Self {
            without_capital_gains,
            with_capital_gains,
            with_capital_gains_and_niit,
        })
    }

    /// Per-share increase caused by capital-gains tax alone.
    pub fn capital_gains_impact(&self) -> Option<Decimal> {
        self.with_capital_gains
            .map(|price| price - self.without_capital_gains)
    }

    /// Per-share increase caused by adding NIIT on top of capital-gains tax.
    pub fn niit_impact(&self) -> Option<Decimal> {
        Some(self.with_capital_gains_and_niit? - self.with_capital_gains?)
    }

    /// Per-share increase of the most complete scenario over the plain price.
    pub fn total_impact(&self) -> Option<Decimal> {
        self.with_capital_gains_and_niit
            .or(self.with_capital_gains)
            .map(|price| price - self.without_capital_gains)
    }
}

/// What to do with the remaining shares, given the vest-day price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Hold out for a higher price; `premium` is the per-share gap over the
    /// vest-day price.
    Wait { premium: Decimal },

    /// The target is met below the vest-day price; `discount` is how far the
    /// price may fall per share.
    SellNow { discount: Decimal },

    /// The required price equals the vest-day price.
    SellAtVestPrice,

    /// Every vested share went to the tax sale.
    NothingToSell,
}

impl Recommendation {
    pub fn for_result(result: &CalculationResult) -> Self {
        if result.shares_after_tax_sale <= 0 {
            return Self::NothingToSell;
        }

        let required = result.required_sale_price;
        let vest_day_price = result.input.vest_day_price;
        match required.cmp(&vest_day_price) {
            Ordering::Greater => Self::Wait {
                premium: required - vest_day_price,
            },
            Ordering::Less => Self::SellNow {
                discount: vest_day_price - required,
            },
            Ordering::Equal => Self::SellAtVestPrice,
        }
    }
}
