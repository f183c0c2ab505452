//! Error types for token amount parsing and arithmetic
//!
//! Amounts are unsigned, so every subtraction that would go below zero and
//! every product that would leave 256 bits is reported instead of wrapping.

use thiserror::Error;

/// Errors that can occur while parsing or computing with an [`crate::Amount`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// Input is empty or contains something other than ASCII digits
    #[error("Invalid amount string: '{input}' - expected unsigned decimal digits")]
    InvalidDigits { input: String },

    /// Result does not fit in 256 bits
    #[error("Overflow: amount exceeds 256 bits")]
    Overflow,

    /// Subtraction would produce a negative amount
    #[error("Underflow: {lhs} - {rhs} is negative")]
    Underflow { lhs: String, rhs: String },

    /// Division or rounding by zero
    #[error("Division by zero in amount arithmetic")]
    DivisionByZero,

    /// Human-readable input carries more fractional digits than the token has
    #[error("'{input}' has more than {decimals} fractional digits")]
    TooManyDecimals { input: String, decimals: u32 },
}
