//! Command-line arguments for `rsucalc`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rsu_core::CalculationInput;
use rust_decimal::Decimal;

use crate::parse::{parse_decimal, parse_rate};

/// Calculate RSU vesting scenarios and required sale prices.
#[derive(Parser, Debug)]
#[command(name = "rsucalc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Also append log records to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log calculation steps at debug level (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Net investment income tax rate applied with --include-net-investment-tax
    #[arg(long, global = true, value_parser = parse_rate, default_value = "0.038")]
    pub niit_rate: Decimal,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price the remaining shares of a single vesting event
    #[command(allow_negative_numbers = true)]
    Calc(VestArgs),

    /// Price every vesting event in a CSV file
    Batch {
        /// Path to the CSV file of vesting events
        file: PathBuf,
    },
}

/// One vesting event. Prices accept `$` and thousands separators; rates
/// accept `0.22` or `22%`.
#[derive(Args, Debug, Clone)]
pub struct VestArgs {
    /// VCD (vesting commencement date) price per share
    #[arg(short = 'v', long, value_parser = parse_decimal)]
    pub vcd_price: Decimal,

    /// Number of shares vesting
    #[arg(short = 's', long)]
    pub vesting_shares: i64,

    /// Share price on vest day
    #[arg(short = 'p', long, value_parser = parse_decimal)]
    pub vest_day_price: Decimal,

    /// Medicare tax rate, e.g. 0.0145 or 1.45%
    #[arg(short = 'm', long, value_parser = parse_rate)]
    pub medicare_rate: Decimal,

    /// Social Security tax rate, e.g. 0.062 or 6.2%
    #[arg(short = 'o', long, value_parser = parse_rate)]
    pub social_security_rate: Decimal,

    /// Federal tax rate, e.g. 0.22 or 22%
    #[arg(short = 'r', long, value_parser = parse_rate)]
    pub federal_rate: Decimal,

    /// SALT (state and local tax) rate, e.g. 0.05 or 5%
    #[arg(short = 't', long, value_parser = parse_rate)]
    pub salt_rate: Decimal,

    /// Number of shares sold for tax withholding
    #[arg(short = 'x', long)]
    pub shares_sold_for_taxes: i64,

    /// Price per share when sold for taxes
    #[arg(short = 'a', long, value_parser = parse_decimal)]
    pub tax_sale_price: Decimal,

    /// Include short-term capital gains tax (federal + SALT rates)
    #[arg(short = 'c', long, default_value_t = false)]
    pub include_capital_gains: bool,

    /// Include net investment income tax on capital gains
    #[arg(short = 'n', long, default_value_t = false)]
    pub include_net_investment_tax: bool,
}

impl From<VestArgs> for CalculationInput {
    fn from(args: VestArgs) -> Self {
        Self {
            vcd_price: args.vcd_price,
            vesting_shares: args.vesting_shares,
            vest_day_price: args.vest_day_price,
            medicare_rate: args.medicare_rate,
            social_security_rate: args.social_security_rate,
            federal_rate: args.federal_rate,
            salt_rate: args.salt_rate,
            shares_sold_for_taxes: args.shares_sold_for_taxes,
            tax_sale_price: args.tax_sale_price,
            include_capital_gains: args.include_capital_gains,
            include_net_investment_tax: args.include_net_investment_tax,
        }
    }
}
