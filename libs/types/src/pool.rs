//! Exchange pool snapshots and NEP-145 storage balances
//!
//! Both are fetched fresh for every operation. A pool read now may differ
//! from the pool the transaction eventually executes against, which is why
//! every amount derived from it carries a haircut.

use crate::Amount;
use near_sdk::AccountId;
use serde::{Deserialize, Serialize};

/// Exchange-assigned pool index
pub type PoolId = u64;

/// Point-in-time view of one liquidity pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    /// Exchange pool flavour ("SIMPLE_POOL", "STABLE_SWAP", ...)
    pub pool_kind: String,
    /// Constituent tokens; index `i` here is index `i` in `token_amounts`
    pub token_account_ids: Vec<AccountId>,
    pub token_amounts: Vec<Amount>,
    /// Total swap fee in basis points (30 = 0.3%)
    pub fee: u32,
    pub total_shares: Amount,
}

impl Pool {
    /// Position of `token` within the pool, if it is a constituent
    pub fn token_index(&self, token: &AccountId) -> Option<usize> {
        self.token_account_ids.iter().position(|t| t == token)
    }
}

/// LP share token id for `pool_id` (":<id>"), also the farm seed suffix
pub fn share_token_id(pool_id: PoolId) -> String {
    format!(":{pool_id}")
}

/// Storage balance of an account on a NEP-145 contract
///
/// `available` is absent on contracts that report only a total, which is
/// treated the same as an account that never registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStorageBalance {
    pub total: Amount,
    #[serde(default)]
    pub available: Option<Amount>,
}

impl AccountStorageBalance {
    pub fn is_registered(&self) -> bool {
        self.available.is_some()
    }
}
