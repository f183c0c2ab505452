//! Error types for recipe steps

use lagoon_amm::PoolMathError;
use lagoon_chain::ChainError;
use lagoon_types::{AccountId, AmountError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecipeError {
    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    PoolMath(#[from] PoolMathError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    /// Token is not where the step expects it (a pool, the exchange deposits)
    #[error("Token {token} is not in {location}")]
    UnknownToken { token: AccountId, location: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl RecipeError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
