//! In-memory chain and wallet doubles for tests

use crate::{ChainError, ChainView, Navigator, WalletSigner};
use async_trait::async_trait;
use lagoon_types::{AccessKey, AccountId, Action, Amount, CryptoHash, Pool, Transaction};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use url::Url;

struct ViewStub {
    contract: AccountId,
    method: String,
    /// `None` matches any arguments
    args: Option<Value>,
    /// `None` makes the call fail
    result: Option<Value>,
}

enum KeyScope {
    Full,
    /// Function-call key: this receiver only, no attached deposits
    FunctionCall(AccountId),
}

/// Scripted [`ChainView`]
///
/// Later stubs shadow earlier ones for the same call. Unscripted views fail
/// with [`ChainError::ViewCallFailure`] so a test never silently reads
/// default state.
pub struct MockChain {
    views: Vec<ViewStub>,
    keys: Vec<(AccountId, KeyScope, AccessKey)>,
    native: HashMap<AccountId, Amount>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockChain {
    pub const BLOCK_HASH: CryptoHash = [7; 32];

    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            keys: Vec::new(),
            native: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer `method` on `contract` with `result` when called with exactly `args`
    pub fn with_view(mut self, contract: AccountId, method: &str, args: Value, result: Value) -> Self {
        self.views.push(ViewStub {
            contract,
            method: method.to_string(),
            args: Some(args),
            result: Some(result),
        });
        self
    }

    /// Answer `method` on `contract` with `result` whatever the arguments
    pub fn with_view_any(mut self, contract: AccountId, method: &str, result: Value) -> Self {
        self.views.push(ViewStub {
            contract,
            method: method.to_string(),
            args: None,
            result: Some(result),
        });
        self
    }

    pub fn with_failing_view(mut self, contract: AccountId, method: &str) -> Self {
        self.views.push(ViewStub {
            contract,
            method: method.to_string(),
            args: None,
            result: None,
        });
        self
    }

    /// NEP-145 balance; `None` is an unregistered account, `(total, None)`
    /// a contract that reports no `available`
    pub fn with_storage_balance(
        self,
        contract: AccountId,
        account: AccountId,
        balance: Option<(Amount, Option<Amount>)>,
    ) -> Self {
        let result = match balance {
            Some((total, Some(available))) => json!({ "total": total, "available": available }),
            Some((total, None)) => json!({ "total": total }),
            None => Value::Null,
        };
        self.with_view(
            contract,
            "storage_balance_of",
            json!({ "account_id": account }),
            result,
        )
    }

    /// Serve `pool` from the exchange's `get_pool`
    pub fn with_pool(self, exchange: AccountId, pool: &Pool) -> Self {
        self.with_view(
            exchange,
            "get_pool",
            json!({ "pool_id": pool.id }),
            json!({
                "pool_kind": pool.pool_kind,
                "token_account_ids": pool.token_account_ids,
                "amounts": pool.token_amounts,
                "total_fee": pool.fee,
                "shares_total_supply": pool.total_shares,
            }),
        )
    }

    pub fn with_full_access_key(mut self, account: AccountId, key: AccessKey) -> Self {
        self.keys.push((account, KeyScope::Full, key));
        self
    }

    pub fn with_function_call_key(mut self, account: AccountId, receiver: AccountId, key: AccessKey) -> Self {
        self.keys.push((account, KeyScope::FunctionCall(receiver), key));
        self
    }

    pub fn with_native_balance(mut self, account: AccountId, balance: Amount) -> Self {
        self.native.insert(account, balance);
        self
    }

    /// `(contract, method)` of every view call made so far
    pub fn view_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub fn view_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|(_, m)| m == method).count()
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainView for MockChain {
    async fn view(&self, contract: &AccountId, method: &str, args: Value) -> Result<Value, ChainError> {
        self.calls.lock().push((contract.to_string(), method.to_string()));

        let stub = self.views.iter().rev().find(|stub| {
            &stub.contract == contract
                && stub.method == method
                && stub.args.as_ref().map_or(true, |expected| expected == &args)
        });

        match stub {
            Some(ViewStub { result: Some(result), .. }) => Ok(result.clone()),
            Some(_) => Err(ChainError::view_failure(contract, method, "scripted failure")),
            None => Err(ChainError::view_failure(
                contract,
                method,
                format!("no stub for args {args}"),
            )),
        }
    }

    async fn resolve_access_key(
        &self,
        account: &AccountId,
        receiver: &AccountId,
        actions: &[Action],
    ) -> Result<Option<AccessKey>, ChainError> {
        let mut function_call = None;
        for (owner, scope, key) in &self.keys {
            if owner != account {
                continue;
            }
            match scope {
                KeyScope::Full => return Ok(Some(key.clone())),
                KeyScope::FunctionCall(allowed) => {
                    let free = actions.iter().all(|a| a.attached_deposit.is_zero());
                    if allowed == receiver && free && function_call.is_none() {
                        function_call = Some(key.clone());
                    }
                }
            }
        }
        Ok(function_call)
    }

    async fn latest_final_block_hash(&self) -> Result<CryptoHash, ChainError> {
        Ok(Self::BLOCK_HASH)
    }

    async fn native_balance(&self, account: &AccountId) -> Result<Amount, ChainError> {
        self.native
            .get(account)
            .copied()
            .ok_or_else(|| ChainError::view_failure(account, "view_account", "unknown account"))
    }
}

/// [`WalletSigner`] that keeps every request instead of redirecting
#[derive(Default)]
pub struct RecordingSigner {
    requests: Mutex<Vec<(Vec<Transaction>, Url)>>,
}

impl RecordingSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<(Vec<Transaction>, Url)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl WalletSigner for RecordingSigner {
    async fn request_sign(&self, transactions: Vec<Transaction>, return_location: Url) -> Result<(), ChainError> {
        self.requests.lock().push((transactions, return_location));
        Ok(())
    }
}

/// [`Navigator`] that records visited URLs
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Url>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Url> {
        self.visited.lock().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: Url) -> Result<(), ChainError> {
        self.visited.lock().push(url);
        Ok(())
    }
}
