//! Error types returned by number parsing and the position calculator.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::format::NumberLocale;

/// Text that could not be read as a number under the chosen locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {input:?} as a {locale} number")]
pub struct ParseError {
    /// Raw text as it was handed to the parser
    pub input: String,
    pub locale: NumberLocale,
}

/// Calculation input fields, named the way callers and forms refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    EntryPrice,
    MaxLoss,
    StopLossPercent,
    Leverage,
    EntryFeePercent,
    ExitFeePercent,
}

impl InputField {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::EntryPrice => "entryPrice",
            InputField::MaxLoss => "maxLoss",
            InputField::StopLossPercent => "stopLossPercent",
            InputField::Leverage => "leverage",
            InputField::EntryFeePercent => "entryFeePercent",
            InputField::ExitFeePercent => "exitFeePercent",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a position calculation. No partial result accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: InputField, reason: String },

    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl CalcError {
    pub(crate) fn not_positive(field: InputField, value: Decimal) -> Self {
        CalcError::InvalidInput {
            field,
            reason: format!("must be greater than 0 (got {value})"),
        }
    }

    pub(crate) fn negative(field: InputField, value: Decimal) -> Self {
        CalcError::InvalidInput {
            field,
            reason: format!("must not be negative (got {value})"),
        }
    }

    /// The offending input field, if this is a validation failure.
    pub fn field(&self) -> Option<InputField> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(*field),
            CalcError::Overflow(_) => None,
        }
    }
}
