//! Unsigned transaction assembly
//!
//! A [`TransactionPlan`] is a receiver plus the ordered calls to make on it.
//! [`TransactionBuilder`] turns plans into [`Transaction`]s by resolving the
//! signing key, a recent final block hash and a fresh nonce. Nothing is
//! signed or sent.

use crate::{ChainError, ChainView, NonceSequencer};
use futures::future::try_join_all;
use lagoon_types::{AccessKey, AccountId, Action, CryptoHash, Transaction};
use std::sync::Arc;
use tracing::{debug, info};

/// Calls to make on one receiver, in order
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPlan {
    pub receiver_id: AccountId,
    pub actions: Vec<Action>,
}

impl TransactionPlan {
    pub fn new(receiver_id: AccountId) -> Self {
        Self {
            receiver_id,
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Append the action if there is one (conditional pre-flight calls)
    pub fn with_optional(mut self, action: Option<Action>) -> Self {
        self.actions.extend(action);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Builds unsigned transactions for one signer
#[derive(Clone)]
pub struct TransactionBuilder {
    view: Arc<dyn ChainView>,
    sequencer: Arc<NonceSequencer>,
    signer_id: AccountId,
}

impl TransactionBuilder {
    pub fn new(view: Arc<dyn ChainView>, sequencer: Arc<NonceSequencer>, signer_id: AccountId) -> Self {
        Self {
            view,
            sequencer,
            signer_id,
        }
    }

    async fn resolve_key(&self, plan: &TransactionPlan) -> Result<AccessKey, ChainError> {
        if plan.is_empty() {
            return Err(ChainError::EmptyActions {
                receiver: plan.receiver_id.clone(),
            });
        }
        self.view
            .resolve_access_key(&self.signer_id, &plan.receiver_id, &plan.actions)
            .await?
            .ok_or_else(|| ChainError::NoMatchingKey {
                receiver: plan.receiver_id.clone(),
            })
    }

    fn assemble(&self, plan: TransactionPlan, key: AccessKey, block_hash: CryptoHash) -> Transaction {
        let nonce = self.sequencer.reserve(&self.signer_id, &key);
        debug!(
            receiver = %plan.receiver_id,
            nonce,
            actions = plan.actions.len(),
            "transaction assembled"
        );
        Transaction {
            signer_id: self.signer_id.clone(),
            public_key: key.public_key,
            receiver_id: plan.receiver_id,
            nonce,
            block_hash,
            actions: plan.actions,
        }
    }

    /// Build one transaction; an empty plan is an error
    pub async fn build(&self, plan: TransactionPlan) -> Result<Transaction, ChainError> {
        let (key, block_hash) =
            futures::try_join!(self.resolve_key(&plan), self.view.latest_final_block_hash())?;
        Ok(self.assemble(plan, key, block_hash))
    }

    /// Build a batch, skipping empty plans
    ///
    /// Keys and the block hash are resolved concurrently; nonces are then
    /// reserved in plan order so a wallet submitting the batch sequentially
    /// sees increasing nonces for a shared key.
    pub async fn build_batch(&self, plans: Vec<TransactionPlan>) -> Result<Vec<Transaction>, ChainError> {
        let plans: Vec<_> = plans.into_iter().filter(|p| !p.is_empty()).collect();
        if plans.is_empty() {
            return Ok(Vec::new());
        }

        let (keys, block_hash) = futures::try_join!(
            try_join_all(plans.iter().map(|plan| self.resolve_key(plan))),
            self.view.latest_final_block_hash(),
        )?;

        let transactions: Vec<_> = plans
            .into_iter()
            .zip(keys)
            .map(|(plan, key)| self.assemble(plan, key, block_hash))
            .collect();

        info!(
            signer = %self.signer_id,
            count = transactions.len(),
            "transaction batch built"
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChain;
    use lagoon_types::{Amount, Gas};
    use serde_json::json;

    fn alice() -> AccountId {
        "alice.near".parse().unwrap()
    }

    fn key(nonce: u64) -> AccessKey {
        AccessKey {
            public_key: "ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp"
                .parse()
                .unwrap(),
            nonce,
        }
    }

    fn call(method: &str) -> Action {
        Action::call(method, json!({}), Gas::from_tgas(30))
    }

    fn builder(chain: MockChain) -> TransactionBuilder {
        TransactionBuilder::new(Arc::new(chain), Arc::new(NonceSequencer::new()), alice())
    }

    #[tokio::test]
    async fn test_build_uses_key_nonce_plus_one() {
        let builder = builder(MockChain::new().with_full_access_key(alice(), key(100)));
        let tx = builder
            .build(TransactionPlan::new("wrap.near".parse().unwrap()).with_action(call("near_deposit")))
            .await
            .unwrap();
        assert_eq!(tx.nonce, 101);
        assert_eq!(tx.signer_id, alice());
        assert_eq!(tx.block_hash, MockChain::BLOCK_HASH);
        assert_eq!(tx.method_names(), vec!["near_deposit"]);
    }

    #[tokio::test]
    async fn test_missing_key_fails() {
        let builder = builder(MockChain::new());
        let err = builder
            .build(TransactionPlan::new("wrap.near".parse().unwrap()).with_action(call("near_deposit")))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChainError::NoMatchingKey {
                receiver: "wrap.near".parse().unwrap()
            }
        );
    }

    #[tokio::test]
    async fn test_function_call_key_cannot_attach_deposit() {
        let wrap: AccountId = "wrap.near".parse().unwrap();
        let builder = builder(MockChain::new().with_function_call_key(alice(), wrap.clone(), key(3)));

        let free = builder
            .build(TransactionPlan::new(wrap.clone()).with_action(call("ft_balance_of")))
            .await
            .unwrap();
        assert_eq!(free.nonce, 4);

        let paid = builder
            .build(
                TransactionPlan::new(wrap.clone())
                    .with_action(call("near_deposit").with_deposit(Amount::from(1u64))),
            )
            .await;
        assert!(matches!(paid, Err(ChainError::NoMatchingKey { .. })));
    }

    #[tokio::test]
    async fn test_empty_plan_is_rejected() {
        let builder = builder(MockChain::new().with_full_access_key(alice(), key(0)));
        let err = builder
            .build(TransactionPlan::new("wrap.near".parse().unwrap()))
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::EmptyActions { .. }));
    }

    #[tokio::test]
    async fn test_batch_skips_empty_plans_and_orders_nonces() {
        let builder = builder(MockChain::new().with_full_access_key(alice(), key(7)));
        let plans = vec![
            TransactionPlan::new("v2.ref-finance.near".parse().unwrap()),
            TransactionPlan::new("wrap.near".parse().unwrap()).with_action(call("near_deposit")),
            TransactionPlan::new("dai.near".parse().unwrap()).with_action(call("ft_transfer_call")),
            TransactionPlan::new("v2.ref-finance.near".parse().unwrap())
                .with_action(call("add_liquidity")),
        ];

        let txs = builder.build_batch(plans).await.unwrap();
        assert_eq!(txs.len(), 3);
        assert_eq!(txs.iter().map(|t| t.nonce).collect::<Vec<_>>(), vec![8, 9, 10]);
        assert!(txs.iter().all(|t| !t.actions.is_empty()));
    }

    #[tokio::test]
    async fn test_concurrent_batches_share_no_nonce() {
        let builder = builder(MockChain::new().with_full_access_key(alice(), key(0)));
        let plan = || {
            vec![
                TransactionPlan::new("wrap.near".parse().unwrap()).with_action(call("near_deposit")),
                TransactionPlan::new("dai.near".parse().unwrap()).with_action(call("ft_transfer_call")),
            ]
        };

        let (a, b) = futures::try_join!(builder.build_batch(plan()), builder.build_batch(plan())).unwrap();
        let mut nonces: Vec<u64> = a.iter().chain(b.iter()).map(|t| t.nonce).collect();
        assert!(a[0].nonce < a[1].nonce);
        assert!(b[0].nonce < b[1].nonce);
        nonces.sort_unstable();
        assert_eq!(nonces, vec![1, 2, 3, 4]);
    }
}
