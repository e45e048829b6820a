//! Error types for wire-calc

use thiserror::Error;

/// Costing errors
///
/// Bad geometry never shows up here: the weight calculator is fail-soft and
/// returns `0.0` instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid rate sheet: {0}")]
    InvalidRateSheet(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl CalcError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_rate_sheet(msg: impl Into<String>) -> Self {
        Self::InvalidRateSheet(msg.into())
    }

    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory(name.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
