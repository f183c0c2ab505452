//! Swap quotes, delegated to the exchange contract
//!
//! The constant-pool curve is not re-implemented here: the exchange's own
//! read-only quote is the single source of truth and is returned unmodified.

use async_trait::async_trait;
use lagoon_types::{AccountId, Amount, PoolId};
use tracing::debug;

/// Source of read-only swap quotes
#[async_trait]
pub trait PoolQuoter: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Raw output the pool would pay for `amount_in` of `token_in`
    async fn quote_return(
        &self,
        pool_id: PoolId,
        token_in: &AccountId,
        amount_in: Amount,
        token_out: &AccountId,
    ) -> Result<Amount, Self::Error>;
}

/// Expected output for a single-pool swap, straight from the contract
pub async fn pool_output_for_input<Q: PoolQuoter + ?Sized>(
    quoter: &Q,
    pool_id: PoolId,
    token_in: &AccountId,
    amount_in: Amount,
    token_out: &AccountId,
) -> Result<Amount, Q::Error> {
    let amount_out = quoter
        .quote_return(pool_id, token_in, amount_in, token_out)
        .await?;
    debug!(pool_id, %token_in, %amount_in, %token_out, %amount_out, "pool quote");
    Ok(amount_out)
}
