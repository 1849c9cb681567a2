pub mod calculations;
pub mod models;

pub use calculations::{
    InputError, PricingConfig, PricingEngine, PricingError, calculate_required_sale_price,
    validate_inputs,
};
pub use models::*;
