//! Read-only chain interface supplied by the RPC/wallet transport

use crate::ChainError;
use async_trait::async_trait;
use lagoon_types::{AccessKey, AccountId, Action, Amount, CryptoHash};
use serde_json::Value;

/// Side-effect-free access to chain state
///
/// Implementations map transport failures to [`ChainError::ViewCallFailure`].
/// Timeouts and retries belong to the implementation, not to callers.
#[async_trait]
pub trait ChainView: Send + Sync {
    /// Call a view method on `contract` with JSON `args`
    async fn view(&self, contract: &AccountId, method: &str, args: Value)
        -> Result<Value, ChainError>;

    /// Highest-permission key of `account` allowed to sign `actions` on `receiver`
    async fn resolve_access_key(
        &self,
        account: &AccountId,
        receiver: &AccountId,
        actions: &[Action],
    ) -> Result<Option<AccessKey>, ChainError>;

    /// Hash of the latest final block, used as the transaction's recent block hash
    async fn latest_final_block_hash(&self) -> Result<CryptoHash, ChainError>;

    /// Liquid NEAR balance of `account`, in yocto
    async fn native_balance(&self, account: &AccountId) -> Result<Amount, ChainError>;
}
