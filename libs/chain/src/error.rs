//! Chain layer errors

use lagoon_types::{AccountId, AmountError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChainError {
    /// No access key of the signer may sign these actions for this receiver
    #[error("No access key can sign the requested actions for {receiver}")]
    NoMatchingKey { receiver: AccountId },

    /// Transport or RPC failure; never retried here
    #[error("View call {method} on {target} failed: {reason}")]
    ViewCallFailure {
        target: String,
        method: String,
        reason: String,
    },

    /// The call succeeded but its result does not match the expected schema
    #[error("Malformed response from {target}.{method}: {reason}")]
    MalformedResponse {
        target: String,
        method: String,
        reason: String,
    },

    /// A transaction must carry at least one action
    #[error("Transaction for {receiver} has no actions")]
    EmptyActions { receiver: AccountId },

    /// Transaction could not be encoded for the wallet
    #[error("Failed to encode transactions for the wallet: {0}")]
    Encoding(String),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl ChainError {
    pub fn view_failure(
        target: impl ToString,
        method: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::ViewCallFailure {
            target: target.to_string(),
            method: method.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(target: impl ToString, method: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            target: target.to_string(),
            method: method.into(),
            reason: reason.to_string(),
        }
    }
}
