//! Plain-text report for a single vesting event.

use std::fmt;

use rsu_core::calculations::{PriceScenarios, Recommendation};
use rsu_core::{CalculationResult, WithholdingKind};
use rust_decimal::Decimal;

use crate::format::{format_currency, format_percentage};

const RULE_WIDTH: usize = 60;
const SECTION_WIDTH: usize = 30;

/// Renders a priced vesting event through `Display`.
pub struct Report<'a> {
    result: &'a CalculationResult,
    scenarios: &'a PriceScenarios,
    niit_rate: Decimal,
}

impl<'a> Report<'a> {
    pub fn new(
        result: &'a CalculationResult,
        scenarios: &'a PriceScenarios,
        niit_rate: Decimal,
    ) -> Self {
        Self {
            result,
            scenarios,
            niit_rate,
        }
    }

    fn input_summary(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let input = &self.result.input;
        section(f, "INPUT SUMMARY")?;
        writeln!(f, "Shares & Prices:")?;
        writeln!(f, "  Vesting Shares:         {}", input.vesting_shares)?;
        writeln!(f, "  VCD Price:              {}", format_currency(input.vcd_price))?;
        writeln!(f, "  Vest Day Price:         {}", format_currency(input.vest_day_price))?;
        writeln!(f, "  Tax Sale Price:         {}", format_currency(input.tax_sale_price))?;
        writeln!(f, "  Shares Sold for Taxes:  {}", input.shares_sold_for_taxes)?;

        writeln!(f, "\nTax Rates:")?;
        for kind in [
            WithholdingKind::Federal,
            WithholdingKind::SocialSecurity,
            WithholdingKind::Medicare,
            WithholdingKind::Salt,
        ] {
            writeln!(
                f,
                "  {:<22}{}",
                format!("{}:", kind.label()),
                format_percentage(kind.rate(input))
            )?;
        }
        writeln!(
            f,
            "  {:<22}{}",
            "Total:",
            format_percentage(self.result.total_tax_rate)
        )
    }

    fn financial_breakdown(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.result;
        section(f, "FINANCIAL BREAKDOWN")?;
        writeln!(f, "Gross Income:")?;
        writeln!(f, "  At VCD Price:           {}", format_currency(result.gross_income_vcd))?;
        writeln!(f, "  At Vest Price:          {}", format_currency(result.gross_income_vest_day))?;

        writeln!(f, "\nTax Breakdown:")?;
        writeln!(f, "  Federal Tax:            {}", format_currency(result.federal_tax))?;
        writeln!(f, "  Social Security:        {}", format_currency(result.social_security_tax))?;
        writeln!(f, "  Medicare Tax:           {}", format_currency(result.medicare_tax))?;
        writeln!(f, "  SALT Tax:               {}", format_currency(result.salt_tax))?;
        writeln!(f, "  Total Taxes:            {}", format_currency(result.total_withholding))?;

        writeln!(f, "\nShare Sale for Taxes:")?;
        writeln!(f, "  Tax Sale Proceeds:      {}", format_currency(result.tax_sale_proceeds))?;
        writeln!(f, "  Cash Distribution:      {}", format_currency(result.cash_distribution))?;
        writeln!(f, "  Remaining Shares:       {}", result.shares_after_tax_sale)?;

        writeln!(f, "\nNet Income Targets:")?;
        writeln!(f, "  Original Target:        {}", format_currency(result.original_net_income_target))?;
        writeln!(f, "  Adjusted Target:        {}", format_currency(result.adjusted_net_income_target))
    }

    fn price_analysis(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        section(f, "PRICE ANALYSIS")?;

        let Some(capital_gains_tax) = self.result.capital_gains_tax else {
            return writeln!(f, "No capital gains tax (selling at or below vest price)");
        };

        let niit_label = format!("NIIT ({})", format_percentage(self.niit_rate));
        writeln!(f, "Capital gains tax applies (selling above vest price)")?;
        writeln!(f, "  Capital Gains Tax:      {}", format_currency(capital_gains_tax))?;
        if let (Some(niit_tax), Some(total)) =
            (self.result.niit_tax, self.result.total_capital_gains_tax())
        {
            writeln!(f, "  {:<24}{}", format!("{niit_label}:"), format_currency(niit_tax))?;
            writeln!(f, "  Total Cap. Gains + NIIT: {}", format_currency(total))?;
        }

        let scenarios = self.scenarios;
        writeln!(f, "\nPrice Scenarios:")?;
        writeln!(
            f,
            "  1. No Capital Gains:    {}",
            format_currency(scenarios.without_capital_gains)
        )?;
        if let Some(price) = scenarios.with_capital_gains {
            writeln!(f, "  2. + Capital Gains:     {}", format_currency(price))?;
        }
        if let Some(price) = scenarios.with_capital_gains_and_niit {
            writeln!(f, "  3. + Cap. Gains + NIIT: {}", format_currency(price))?;
        }

        writeln!(f, "\nImpact Analysis:")?;
        if let Some(impact) = scenarios.capital_gains_impact() {
            writeln!(f, "  Capital Gains:          +{}/share", format_currency(impact))?;
        }
        if let Some(impact) = scenarios.niit_impact() {
            writeln!(f, "  {:<24}+{}/share", format!("{niit_label}:"), format_currency(impact))?;
        }
        if let Some(impact) = scenarios
            .with_capital_gains_and_niit
            .and(scenarios.total_impact())
        {
            writeln!(f, "  Total Impact:           +{}/share", format_currency(impact))?;
        }
        Ok(())
    }

    fn final_result(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        section(f, "FINAL RESULT")?;
        writeln!(
            f,
            "Target Net Income:        {}",
            format_currency(self.result.adjusted_net_income_target)
        )?;
        writeln!(f, "Remaining Shares:         {}", self.result.shares_after_tax_sale)?;
        writeln!(
            f,
            "\nREQUIRED SALE PRICE:      {}",
            format_currency(self.result.required_sale_price)
        )?;

        writeln!(f, "\nRecommendation:")?;
        match Recommendation::for_result(self.result) {
            Recommendation::Wait { premium } => writeln!(
                f,
                "WAIT for a higher price (+{}/share premium needed)",
                format_currency(premium)
            ),
            Recommendation::SellNow { discount } => writeln!(
                f,
                "SELL NOW (can accept up to {}/share discount)",
                format_currency(discount)
            ),
            Recommendation::SellAtVestPrice => writeln!(f, "SELL at the vest day price"),
            Recommendation::NothingToSell => {
                writeln!(f, "Nothing to sell: every vested share covered taxes")
            }
        }
    }
}

fn section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
) -> fmt::Result {
    writeln!(f, "\n{title}")?;
    writeln!(f, "{}", "-".repeat(SECTION_WIDTH))
}

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "RSU CALCULATOR RESULTS")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;

        self.input_summary(f)?;
        self.financial_breakdown(f)?;
        if self.result.input.include_capital_gains {
            self.price_analysis(f)?;
        }
        self.final_result(f)?;

        write!(f, "\n{}", "=".repeat(RULE_WIDTH))
    }
}
