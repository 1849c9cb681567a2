//! Pricing a whole batch of vesting events.

use std::fmt;

use rsu_core::{CalculationResult, PricingEngine};
use tracing::warn;

use crate::csv_loader::VestEvent;
use crate::format::{format_currency, format_optional_currency};

/// What happened to one event of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Priced(Box<CalculationResult>),

    /// Validation messages, in validator order.
    Invalid(Vec<String>),

    /// The engine rejected an input that passed validation.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub row: usize,
    pub label: String,
    pub outcome: RowOutcome,
}

/// Per-row outcomes for a batch, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: Vec<BatchRow>,
}

impl BatchSummary {
    /// Validates and prices every event. Invalid or failing rows are logged
    /// and kept in the summary; they never abort the batch.
    pub fn price_all(
        engine: &PricingEngine,
        events: &[VestEvent],
    ) -> Self {
        let rows = events
            .iter()
            .map(|event| BatchRow {
                row: event.row,
                label: event.label.clone(),
                outcome: price_event(engine, event),
            })
            .collect();

        Self { rows }
    }

    /// Number of rows that were not priced.
    pub fn failures(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| !matches!(row.outcome, RowOutcome::Priced(_)))
            .count()
    }

    pub fn priced(&self) -> impl Iterator<Item = (&BatchRow, &CalculationResult)> {
        self.rows.iter().filter_map(|row| match &row.outcome {
            RowOutcome::Priced(result) => Some((row, result.as_ref())),
            _ => None,
        })
    }
}

fn price_event(
    engine: &PricingEngine,
    event: &VestEvent,
) -> RowOutcome {
    let errors = rsu_core::validate_inputs(&event.input);
    if !errors.is_empty() {
        warn!(row = event.row, label = %event.label, ?errors, "skipping invalid vest event");
        return RowOutcome::Invalid(errors);
    }

    match engine.calculate(&event.input) {
        Ok(result) => RowOutcome::Priced(Box::new(result)),
        Err(error) => {
            warn!(row = event.row, label = %event.label, %error, "vest event could not be priced");
            RowOutcome::Failed(error.to_string())
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:<4} {:<16} {:>14} {:>14} {:>14} {:>14}",
            "Row", "Label", "Vest price", "Cash dist.", "Cap. gains", "Required"
        )?;

        for row in &self.rows {
            match &row.outcome {
                RowOutcome::Priced(result) => writeln!(
                    f,
                    "{:<4} {:<16} {:>14} {:>14} {:>14} {:>14}",
                    row.row,
                    row.label,
                    format_currency(result.input.vest_day_price),
                    format_currency(result.cash_distribution),
                    format_optional_currency(result.total_capital_gains_tax()),
                    format_currency(result.required_sale_price),
                )?,
                RowOutcome::Invalid(errors) => writeln!(
                    f,
                    "{:<4} {:<16} invalid: {}",
                    row.row,
                    row.label,
                    errors.join("; ")
                )?,
                RowOutcome::Failed(message) => {
                    writeln!(f, "{:<4} {:<16} error: {message}", row.row, row.label)?
                }
            }
        }

        write!(
            f,
            "\n{} priced, {} skipped",
            self.rows.len() - self.failures(),
            self.failures()
        )
    }
}
