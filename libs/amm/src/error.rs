//! AMM math errors

use lagoon_types::AmountError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolMathError {
    /// Pool has no shares or a zero reserve, so ratios are undefined
    #[error("Pool is empty: shares or a reserve is zero")]
    EmptyPool,

    /// Per-token arrays do not line up with the pool's tokens
    #[error("Expected {expected} per-token amounts, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Withdrawal asks for more shares than exist
    #[error("Requested {requested} shares but the pool only has {total}")]
    SharesExceedSupply { requested: String, total: String },

    #[error(transparent)]
    Amount(#[from] AmountError),
}
