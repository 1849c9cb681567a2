//! CSV loader for batches of vesting events.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header names
//! are case-sensitive.
//!
//! | Column                       | Required | Type    | Notes                                   |
//! |------------------------------|----------|---------|-----------------------------------------|
//! | `label`                      | no       | string  | Shown in the batch summary              |
//! | `vcd_price`                  | yes      | price   | `$` and `,` are accepted                |
//! | `vesting_shares`             | yes      | integer |                                         |
//! | `vest_day_price`             | yes      | price   |                                         |
//! | `medicare_rate`              | yes      | rate    | `0.0145` or `1.45%`                     |
//! | `social_security_rate`       | yes      | rate    |                                         |
//! | `federal_rate`               | yes      | rate    |                                         |
//! | `salt_rate`                  | yes      | rate    |                                         |
//! | `shares_sold_for_taxes`      | yes      | integer |                                         |
//! | `tax_sale_price`             | yes      | price   |                                         |
//! | `include_capital_gains`      | no       | bool    | `true`/`false`, empty means `false`     |
//! | `include_net_investment_tax` | no       | bool    | `true`/`false`, empty means `false`     |
//!
//! An empty price or rate cell loads as zero and is then reported by the
//! input validator rather than the loader.
//!
//! ### Example
//!
//! ```csv
//! label,vcd_price,vesting_shares,vest_day_price,medicare_rate,social_security_rate,federal_rate,salt_rate,shares_sold_for_taxes,tax_sale_price,include_capital_gains
//! Q1,100.00,100,80.00,1.45%,6.2%,22%,5%,25,80.00,true
//! ```
use std::path::{Path, PathBuf};

use rsu_core::CalculationInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::parse::{parse_decimal, parse_rate};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    label: Option<String>,
    #[serde(deserialize_with = "deserialize_price")]
    vcd_price: Decimal,
    vesting_shares: i64,
    #[serde(deserialize_with = "deserialize_price")]
    vest_day_price: Decimal,
    #[serde(deserialize_with = "deserialize_rate")]
    medicare_rate: Decimal,
    #[serde(deserialize_with = "deserialize_rate")]
    social_security_rate: Decimal,
    #[serde(deserialize_with = "deserialize_rate")]
    federal_rate: Decimal,
    #[serde(deserialize_with = "deserialize_rate")]
    salt_rate: Decimal,
    shares_sold_for_taxes: i64,
    #[serde(deserialize_with = "deserialize_price")]
    tax_sale_price: Decimal,
    #[serde(default)]
    include_capital_gains: Option<bool>,
    #[serde(default)]
    include_net_investment_tax: Option<bool>,
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_decimal(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_rate<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_rate(&raw).map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One vesting event read from a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VestEvent {
    /// 1-based data row number (header = row 0).
    pub row: usize,

    /// The `label` cell, or `row <n>` when the cell is missing or empty.
    pub label: String,

    pub input: CalculationInput,
}

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, unparseable price or rate, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> VestEvent {
    let label = row
        .label
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| format!("row {row_number}"));

    VestEvent {
        row: row_number,
        label,
        input: CalculationInput {
            vcd_price: row.vcd_price,
            vesting_shares: row.vesting_shares,
            vest_day_price: row.vest_day_price,
            medicare_rate: row.medicare_rate,
            social_security_rate: row.social_security_rate,
            federal_rate: row.federal_rate,
            salt_rate: row.salt_rate,
            shares_sold_for_taxes: row.shares_sold_for_taxes,
            tax_sale_price: row.tax_sale_price,
            include_capital_gains: row.include_capital_gains.unwrap_or(false),
            include_net_investment_tax: row.include_net_investment_tax.unwrap_or(false),
        },
    }
}

/// Parse CSV text and return its vesting events in file order.
///
/// Rows are not validated here; a row with a negative price loads fine and
/// is rejected later by the input validator.
///
/// # Errors
///
/// [`CsvLoadError::Parse`] if the CSV is structurally invalid or a cell
/// cannot be deserialised.
pub fn load_from_str(input: &str) -> Result<Vec<VestEvent>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| Ok(convert_row(result?, idx + 1)))
        .collect()
}

/// Read the file at `path` and parse it with [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<VestEvent>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let events = load_from_str(&contents)?;
    tracing::info!(path = %path.display(), events = events.len(), "loaded vest events");
    Ok(events)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const HEADER: &str = "label,vcd_price,vesting_shares,vest_day_price,medicare_rate,social_security_rate,federal_rate,salt_rate,shares_sold_for_taxes,tax_sale_price,include_capital_gains,include_net_investment_tax";

    fn csv_with(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn loads_a_complete_row() {
        let csv = csv_with(&["Q1,100.00,100,80.00,0.0145,0.062,0.22,0.05,25,80.00,true,false"]);

        let events = load_from_str(&csv).unwrap();

        assert_eq!(
            events,
            vec![VestEvent {
                row: 1,
                label: "Q1".to_string(),
                input: CalculationInput {
                    vcd_price: dec!(100.00),
                    vesting_shares: 100,
                    vest_day_price: dec!(80.00),
                    medicare_rate: dec!(0.0145),
                    social_security_rate: dec!(0.062),
                    federal_rate: dec!(0.22),
                    salt_rate: dec!(0.05),
                    shares_sold_for_taxes: 25,
                    tax_sale_price: dec!(80.00),
                    include_capital_gains: true,
                    include_net_investment_tax: false,
                },
            }]
        );
    }

    #[test]
    fn accepts_currency_symbols_and_percentages() {
        let csv = csv_with(&[r#"big,"$1,250.00",1000,"$1,100.50",1.45%,6.2%,22%,5%,300,"$1,100.50",,"#]);

        let input = &load_from_str(&csv).unwrap()[0].input;

        assert_eq!(input.vcd_price, dec!(1250.00));
        assert_eq!(input.vest_day_price, dec!(1100.50));
        assert_eq!(input.medicare_rate, dec!(0.0145));
        assert_eq!(input.federal_rate, dec!(0.22));
    }

    #[test]
    fn empty_flags_default_to_false() {
        let csv = csv_with(&["Q1,100,100,80,0.0145,0.062,0.22,0.05,25,80,,"]);

        let input = &load_from_str(&csv).unwrap()[0].input;

        assert!(!input.include_capital_gains);
        assert!(!input.include_net_investment_tax);
    }

    #[test]
    fn missing_label_falls_back_to_row_number() {
        let csv = csv_with(&[
            "Q1,100,100,80,0.0145,0.062,0.22,0.05,25,80,,",
            ",100,100,80,0.0145,0.062,0.22,0.05,25,80,,",
        ]);

        let labels: Vec<String> = load_from_str(&csv)
            .unwrap()
            .into_iter()
            .map(|event| event.label)
            .collect();

        assert_eq!(labels, vec!["Q1", "row 2"]);
    }

    #[test]
    fn optional_columns_may_be_omitted() {
        let csv = "vcd_price,vesting_shares,vest_day_price,medicare_rate,social_security_rate,federal_rate,salt_rate,shares_sold_for_taxes,tax_sale_price\n\
                   100,100,80,0.0145,0.062,0.22,0.05,25,80";

        let events = load_from_str(csv).unwrap();

        assert_eq!(events[0].label, "row 1");
        assert!(!events[0].input.include_capital_gains);
    }

    #[test]
    fn negative_values_load_for_the_validator() {
        let csv = csv_with(&["bad,-100,100,80,0.0145,0.062,0.22,0.05,25,80,,"]);

        let events = load_from_str(&csv).unwrap();

        assert_eq!(events[0].input.vcd_price, dec!(-100));
    }

    #[test]
    fn empty_price_loads_as_zero() {
        let csv = csv_with(&["blank,,100,80,0.0145,0.062,0.22,0.05,25,80,,"]);

        let events = load_from_str(&csv).unwrap();

        assert_eq!(events[0].input.vcd_price, Decimal::ZERO);
    }

    #[test]
    fn header_only_yields_no_events() {
        assert!(load_from_str(HEADER).unwrap().is_empty());
    }

    #[test]
    fn malformed_price_is_a_parse_error() {
        let csv = csv_with(&["Q1,abc,100,80,0.0145,0.062,0.22,0.05,25,80,,"]);

        let result = load_from_str(&csv);

        assert!(matches!(result, Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn fractional_share_count_is_a_parse_error() {
        let csv = csv_with(&["Q1,100,100.5,80,0.0145,0.062,0.22,0.05,25,80,,"]);

        assert!(matches!(load_from_str(&csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn wrong_column_count_is_a_parse_error() {
        let csv = csv_with(&["Q1,100,100"]);

        assert!(matches!(load_from_str(&csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_from_file(Path::new("does/not/exist.csv"));

        assert!(matches!(result, Err(CsvLoadError::Io { .. })));
    }
}
