use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CalculationInput, WithholdingKind};

/// Every intermediate and final value of a required sale price calculation.
///
/// Currency fields are rounded to cents. `total_tax_rate` and the echoed
/// `input` keep their source precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Vesting shares valued at the VCD price.
    pub gross_income_vcd: Decimal,

    /// Vesting shares valued at the vest-day price. Withholding is based on this.
    pub gross_income_vest_day: Decimal,

    pub total_tax_rate: Decimal,

    /// Sum of the four rounded withholding lines.
    pub total_withholding: Decimal,
    pub federal_tax: Decimal,
    pub social_security_tax: Decimal,
    pub medicare_tax: Decimal,
    pub salt_tax: Decimal,

    /// Net income had the vest-day price equaled the VCD price.
    pub original_net_income_target: Decimal,

    pub shares_after_tax_sale: i64,
    pub tax_sale_proceeds: Decimal,

    /// Tax sale proceeds minus withholding. Negative when the sale fell short
    /// and the balance is owed from elsewhere.
    pub cash_distribution: Decimal,

    /// Income still to be realized by selling the remaining shares.
    pub adjusted_net_income_target: Decimal,

    /// Minimum per-share price for the remaining shares. Zero when no shares remain.
    pub required_sale_price: Decimal,

    /// Short-term capital-gains tax on the profit above the vest-day price.
    pub capital_gains_tax: Option<Decimal>,

    /// Net investment income surtax on the same profit.
    pub niit_tax: Option<Decimal>,

    pub input: CalculationInput,
}

impl CalculationResult {
    /// Returns the rounded withholding amount for one line.
    pub fn withholding(
        &self,
        kind: WithholdingKind,
    ) -> Decimal {
        match kind {
            WithholdingKind::Medicare => self.medicare_tax,
            WithholdingKind::SocialSecurity => self.social_security_tax,
            WithholdingKind::Federal => self.federal_tax,
            WithholdingKind::Salt => self.salt_tax,
        }
    }

    /// Capital-gains tax plus NIIT, when any capital-gains tax applies.
    pub fn total_capital_gains_tax(&self) -> Option<Decimal> {
        self.capital_gains_tax
            .map(|tax| tax + self.niit_tax.unwrap_or(Decimal::ZERO))
    }
}
