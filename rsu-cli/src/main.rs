use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rsu_cli::cli::{Cli, Command};
use rsu_cli::{BatchSummary, Report};
use rsu_core::calculations::PriceScenarios;
use rsu_core::{CalculationInput, PricingConfig, PricingEngine};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    rsu_cli::logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = PricingConfig {
        niit_rate: cli.niit_rate,
    };
    config.validate().context("Invalid --niit-rate")?;
    let engine = PricingEngine::new(config);

    match cli.command {
        Command::Calc(args) => run_calc(&engine, args.into()),
        Command::Batch { file } => run_batch(&engine, &file),
    }
}

fn run_calc(
    engine: &PricingEngine,
    input: CalculationInput,
) -> Result<()> {
    let errors = rsu_core::validate_inputs(&input);
    if !errors.is_empty() {
        eprintln!("Invalid input:");
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!("{} validation error(s)", errors.len());
    }

    let result = engine
        .calculate(&input)
        .context("Failed to calculate required sale price")?;
    let scenarios =
        PriceScenarios::compare(engine, &input).context("Failed to compare price scenarios")?;
    info!(required_sale_price = %result.required_sale_price, "calculation complete");

    println!("{}", Report::new(&result, &scenarios, engine.config().niit_rate));
    Ok(())
}

fn run_batch(
    engine: &PricingEngine,
    file: &Path,
) -> Result<()> {
    let events = rsu_cli::load_from_file(file)
        .with_context(|| format!("Failed to load vest events from: {}", file.display()))?;

    let summary = BatchSummary::price_all(engine, &events);
    println!("{summary}");

    let failures = summary.failures();
    if failures > 0 {
        bail!("{failures} of {} vest events could not be priced", events.len());
    }
    Ok(())
}
