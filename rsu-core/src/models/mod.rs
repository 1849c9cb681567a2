mod calculation_input;
mod calculation_result;
mod withholding_kind;

pub use calculation_input::CalculationInput;
pub use calculation_result::CalculationResult;
pub use withholding_kind::WithholdingKind;
