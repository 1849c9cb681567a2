//! RSU pricing calculations.
//!
//! This module provides input validation, the required sale price engine,
//! and the scenario comparison built on top of it.

pub mod common;
pub mod pricing;
pub mod scenarios;
pub mod validation;

pub use pricing::{
    NIIT_RATE, PricingConfig, PricingEngine, PricingError, calculate_required_sale_price,
};
pub use scenarios::{PriceScenarios, Recommendation};
pub use validation::{InputError, validate_inputs};
