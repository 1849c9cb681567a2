use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs describing a single RSU vesting event.
///
/// Prices are per share. Rates are decimal fractions (`0.22` for 22%).
/// Share counts are signed so that values coming from a form or command
/// line can be validated rather than rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Price per share on the vesting commencement date (the baseline).
    pub vcd_price: Decimal,

    /// Number of shares vesting.
    pub vesting_shares: i64,

    /// Market price per share on the vest date.
    pub vest_day_price: Decimal,

    pub medicare_rate: Decimal,
    pub social_security_rate: Decimal,
    pub federal_rate: Decimal,

    /// State and local tax rate.
    pub salt_rate: Decimal,

    /// Shares sold automatically to cover withholding (sell-to-cover).
    pub shares_sold_for_taxes: i64,

    /// Price per share realized by the sell-to-cover sale.
    pub tax_sale_price: Decimal,

    /// Model short-term capital-gains tax on profit above the vest-day price.
    #[serde(default)]
    pub include_capital_gains: bool,

    /// Add the net investment income surtax. Only applies when
    /// `include_capital_gains` is set.
    #[serde(default)]
    pub include_net_investment_tax: bool,
}

impl CalculationInput {
    /// Sum of the four withholding rates, unrounded. `None` on overflow.
    pub fn total_tax_rate(&self) -> Option<Decimal> {
        self.medicare_rate
            .checked_add(self.social_security_rate)?
            .checked_add(self.federal_rate)?
            .checked_add(self.salt_rate)
    }

    /// Shares left for the employee after the sell-to-cover sale. `None` on
    /// overflow.
    pub fn shares_after_tax_sale(&self) -> Option<i64> {
        self.vesting_shares.checked_sub(self.shares_sold_for_taxes)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn input() -> CalculationInput {
        CalculationInput {
            vcd_price: dec!(100.00),
            vesting_shares: 100,
            vest_day_price: dec!(100.00),
            medicare_rate: dec!(0.0145),
            social_security_rate: dec!(0.062),
            federal_rate: dec!(0.22),
            salt_rate: dec!(0.05),
            shares_sold_for_taxes: 25,
            tax_sale_price: dec!(100.00),
            include_capital_gains: false,
            include_net_investment_tax: false,
        }
    }

    #[test]
    fn total_tax_rate_sums_every_line() {
        assert_eq!(input().total_tax_rate(), Some(dec!(0.3465)));
    }

    #[test]
    fn total_tax_rate_is_none_on_overflow() {
        let input = CalculationInput {
            medicare_rate: Decimal::MAX,
            social_security_rate: Decimal::MAX,
            ..input()
        };

        assert_eq!(input.total_tax_rate(), None);
    }

    #[test]
    fn shares_after_tax_sale_subtracts_sold_shares() {
        assert_eq!(input().shares_after_tax_sale(), Some(75));
    }

    #[test]
    fn shares_after_tax_sale_is_none_on_overflow() {
        let input = CalculationInput {
            vesting_shares: i64::MIN,
            shares_sold_for_taxes: 1,
            ..input()
        };

        assert_eq!(input.shares_after_tax_sale(), None);
    }
}
