//! Typed view queries with schema validation at the boundary
//!
//! Raw JSON from [`ChainView::view`] never leaves this module: each query
//! decodes into an explicit schema and rejects shapes the rest of the
//! workspace could misread (e.g. a pool whose token and amount lists differ
//! in length).

use crate::{ChainError, ChainView};
use async_trait::async_trait;
use lagoon_amm::PoolQuoter;
use lagoon_types::{AccountId, AccountStorageBalance, Amount, Pool, PoolId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// `get_pool` result as the exchange returns it
#[derive(Debug, Deserialize)]
struct RawPool {
    pool_kind: String,
    token_account_ids: Vec<AccountId>,
    amounts: Vec<Amount>,
    total_fee: u32,
    shares_total_supply: Amount,
}

/// Typed queries against the exchange and NEP-141/145 contracts
#[derive(Clone, Copy)]
pub struct Queries<'a> {
    view: &'a dyn ChainView,
    exchange: &'a AccountId,
}

impl<'a> Queries<'a> {
    pub fn new(view: &'a dyn ChainView, exchange: &'a AccountId) -> Self {
        Self { view, exchange }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        contract: &AccountId,
        method: &str,
        args: Value,
    ) -> Result<T, ChainError> {
        let raw = self.view.view(contract, method, args).await?;
        serde_json::from_value(raw).map_err(|e| ChainError::malformed(contract, method, e))
    }

    /// Current reserves and share supply of `pool_id`
    pub async fn get_pool(&self, pool_id: PoolId) -> Result<Pool, ChainError> {
        let raw: RawPool = self
            .call(self.exchange, "get_pool", json!({ "pool_id": pool_id }))
            .await?;

        if raw.token_account_ids.len() != raw.amounts.len() {
            return Err(ChainError::malformed(
                self.exchange,
                "get_pool",
                format!(
                    "{} tokens but {} amounts",
                    raw.token_account_ids.len(),
                    raw.amounts.len()
                ),
            ));
        }
        if raw.token_account_ids.len() < 2 {
            return Err(ChainError::malformed(
                self.exchange,
                "get_pool",
                "pool has fewer than two tokens",
            ));
        }

        debug!(pool_id, kind = %raw.pool_kind, shares = %raw.shares_total_supply, "fetched pool");
        Ok(Pool {
            id: pool_id,
            pool_kind: raw.pool_kind,
            token_account_ids: raw.token_account_ids,
            token_amounts: raw.amounts,
            fee: raw.total_fee,
            total_shares: raw.shares_total_supply,
        })
    }

    /// Exchange's own quote for a single-pool swap, unmodified
    pub async fn get_return(
        &self,
        pool_id: PoolId,
        token_in: &AccountId,
        amount_in: Amount,
        token_out: &AccountId,
    ) -> Result<Amount, ChainError> {
        self.call(
            self.exchange,
            "get_return",
            json!({
                "pool_id": pool_id,
                "token_in": token_in,
                "amount_in": amount_in,
                "token_out": token_out,
            }),
        )
        .await
    }

    /// LP shares `account_id` holds in `pool_id`
    pub async fn get_pool_shares(
        &self,
        pool_id: PoolId,
        account_id: &AccountId,
    ) -> Result<Amount, ChainError> {
        self.call(
            self.exchange,
            "get_pool_shares",
            json!({ "pool_id": pool_id, "account_id": account_id }),
        )
        .await
    }

    /// Token balances deposited on the exchange by `account_id`
    pub async fn get_deposits(
        &self,
        account_id: &AccountId,
    ) -> Result<BTreeMap<AccountId, Amount>, ChainError> {
        self.call(
            self.exchange,
            "get_deposits",
            json!({ "account_id": account_id }),
        )
        .await
    }

    /// NEP-145 storage balance; `None` when the account never registered
    pub async fn storage_balance_of(
        &self,
        contract: &AccountId,
        account_id: &AccountId,
    ) -> Result<Option<AccountStorageBalance>, ChainError> {
        self.call(
            contract,
            "storage_balance_of",
            json!({ "account_id": account_id }),
        )
        .await
    }

    /// NEP-141 balance of `account_id` on `token`
    pub async fn ft_balance_of(
        &self,
        token: &AccountId,
        account_id: &AccountId,
    ) -> Result<Amount, ChainError> {
        self.call(token, "ft_balance_of", json!({ "account_id": account_id }))
            .await
    }

    pub async fn native_balance(&self, account_id: &AccountId) -> Result<Amount, ChainError> {
        self.view.native_balance(account_id).await
    }
}

#[async_trait]
impl PoolQuoter for Queries<'_> {
    type Error = ChainError;

    async fn quote_return(
        &self,
        pool_id: PoolId,
        token_in: &AccountId,
        amount_in: Amount,
        token_out: &AccountId,
    ) -> Result<Amount, ChainError> {
        self.get_return(pool_id, token_in, amount_in, token_out).await
    }
}
