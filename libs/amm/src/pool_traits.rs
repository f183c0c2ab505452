//! Pool trait definitions for the share math

use crate::{PoolMath, PoolMathError};
use lagoon_types::{Amount, Pool};

/// Anything that exposes constant-pool reserves and a share supply
pub trait LiquidityPool {
    /// Reserves in pool token order
    fn token_amounts(&self) -> &[Amount];

    fn total_shares(&self) -> Amount;

    /// Swap fee in basis points
    fn fee_bps(&self) -> u32;

    /// Estimated shares for depositing `supplied` (see [`PoolMath::lp_shares_from_amounts`])
    fn estimate_shares(&self, supplied: &[Amount]) -> Result<Amount, PoolMathError> {
        PoolMath::lp_shares_from_amounts(self.total_shares(), self.token_amounts(), supplied)
    }

    /// Minimum per-token return for burning `shares` (see [`PoolMath::min_lp_amounts_out`])
    fn min_amounts_for_shares(&self, shares: Amount) -> Result<Vec<Amount>, PoolMathError> {
        PoolMath::min_lp_amounts_out(shares, self.total_shares(), self.token_amounts())
    }
}

impl LiquidityPool for Pool {
    fn token_amounts(&self) -> &[Amount] {
        &self.token_amounts
    }

    fn total_shares(&self) -> Amount {
        self.total_shares
    }

    fn fee_bps(&self) -> u32 {
        self.fee
    }
}
