use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CalculationInput;

/// One of the four payroll withholding lines applied at vest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithholdingKind {
    Medicare,
    SocialSecurity,
    Federal,
    Salt,
}

impl WithholdingKind {
    /// Every withholding line, in the order rate violations are reported.
    pub const ALL: [WithholdingKind; 4] = [
        Self::Medicare,
        Self::SocialSecurity,
        Self::Federal,
        Self::Salt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Medicare => "Medicare",
            Self::SocialSecurity => "Social Security",
            Self::Federal => "Federal tax",
            Self::Salt => "SALT",
        }
    }

    /// Returns the rate the input applies to this withholding line.
    pub fn rate(
        &self,
        input: &CalculationInput,
    ) -> Decimal {
        match self {
            Self::Medicare => input.medicare_rate,
            Self::SocialSecurity => input.social_security_rate,
            Self::Federal => input.federal_rate,
            Self::Salt => input.salt_rate,
        }
    }
}

impl fmt::Display for WithholdingKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
