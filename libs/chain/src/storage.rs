//! Storage deposit policy
//!
//! Contracts implementing NEP-145 refuse to track an account (or another
//! token slot for it) until enough storage balance is attached. This module
//! decides, from a freshly queried balance, whether a `storage_deposit` call
//! must precede the real work and how much it carries.
//!
//! Multi-resource registrations must be evaluated once with `items = N`.
//! Evaluating N requirements of one item each against the same balance
//! would size the deposit for a single item.

use crate::{ChainError, Queries};
use lagoon_types::{AccountId, AccountStorageBalance, Action, Amount, AmountError, Gas};
use serde_json::json;
use tracing::debug;

/// How much storage an account needs on one contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRequirement {
    /// Minimum balance per tracked resource; deposits are multiples of this
    pub per_item: Amount,
    /// Number of resources the pending calls will register
    pub items: u32,
    /// Extra cost charged only when the account is not registered at all
    pub registration: Amount,
    /// Pass `registration_only` to the contract (NEP-141 tokens)
    pub registration_only: bool,
}

impl StorageRequirement {
    /// `items` slots of `per_item` each, no separate registration cost
    pub fn slots(per_item: Amount, items: u32) -> Self {
        Self {
            per_item,
            items,
            registration: Amount::ZERO,
            registration_only: false,
        }
    }

    pub fn with_registration(mut self, registration: Amount) -> Self {
        self.registration = registration;
        self
    }

    /// Plain NEP-141 registration: any registered account is enough
    pub fn registration(cost: Amount) -> Self {
        Self {
            per_item: cost,
            items: 0,
            registration: cost,
            registration_only: true,
        }
    }

    /// Balance the account must have available: `per_item * items`
    pub fn required_minimum(&self) -> Result<Amount, AmountError> {
        self.per_item.checked_mul(Amount::from(self.items as u64))
    }

    /// Deposit needed given the current balance, or `None` when covered
    ///
    /// The shortfall is rounded up to a multiple of `per_item` so no deposit
    /// ever pays for a fraction of a slot. A zero `per_item` is rejected
    /// whatever the balance.
    pub fn deposit_for(
        &self,
        balance: Option<&AccountStorageBalance>,
    ) -> Result<Option<Amount>, AmountError> {
        if self.per_item.is_zero() {
            return Err(AmountError::DivisionByZero);
        }
        let required = self.required_minimum()?;

        let shortfall = match balance.and_then(|b| b.available) {
            Some(available) if available >= required => return Ok(None),
            Some(available) => required.checked_sub(available)?,
            None => self.registration.checked_add(required)?,
        };

        let deposit = shortfall.round_up_to_nearest(self.per_item)?;
        Ok((!deposit.is_zero()).then_some(deposit))
    }
}

/// Query `account`'s storage on `contract` and build the pre-flight call if
/// one is needed
pub async fn storage_deposit_action(
    queries: &Queries<'_>,
    contract: &AccountId,
    account: &AccountId,
    requirement: &StorageRequirement,
    gas: Gas,
) -> Result<Option<Action>, ChainError> {
    let balance = queries.storage_balance_of(contract, account).await?;
    let deposit = requirement.deposit_for(balance.as_ref())?;

    debug!(
        %contract,
        %account,
        items = requirement.items,
        registered = balance.as_ref().is_some_and(AccountStorageBalance::is_registered),
        deposit = ?deposit,
        "storage check"
    );

    Ok(deposit.map(|deposit| {
        Action::call(
            "storage_deposit",
            json!({
                "account_id": account,
                "registration_only": requirement.registration_only,
            }),
            gas,
        )
        .with_deposit(deposit)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChain;

    const PER_TOKEN: u64 = 5;

    fn balance(total: u64, available: Option<u64>) -> AccountStorageBalance {
        AccountStorageBalance {
            total: Amount::from(total),
            available: available.map(Amount::from),
        }
    }

    fn deposit(req: &StorageRequirement, b: Option<AccountStorageBalance>) -> Option<Amount> {
        req.deposit_for(b.as_ref()).unwrap()
    }

    #[test]
    fn test_enough_balance_needs_nothing() {
        let req = StorageRequirement::slots(Amount::from(PER_TOKEN), 1);
        assert_eq!(deposit(&req, Some(balance(20, Some(5)))), None);
        assert_eq!(deposit(&req, Some(balance(20, Some(12)))), None);
    }

    #[test]
    fn test_shortfall_rounds_up_to_per_item() {
        let req = StorageRequirement::slots(Amount::from(PER_TOKEN), 1);
        // 5 - 3 = 2, rounded up to 5
        assert_eq!(deposit(&req, Some(balance(10, Some(3)))), Some(Amount::from(5u64)));
    }

    #[test]
    fn test_two_tokens_use_twice_the_minimum() {
        let two = StorageRequirement::slots(Amount::from(PER_TOKEN), 2);
        let one = StorageRequirement::slots(Amount::from(PER_TOKEN), 1);
        let current = balance(20, Some(6));

        // 10 - 6 = 4 -> 5; one slot alone would have been covered
        assert_eq!(deposit(&two, Some(current.clone())), Some(Amount::from(5u64)));
        assert_eq!(deposit(&one, Some(current)), None);
    }

    #[test]
    fn test_unregistered_pays_registration_plus_slots() {
        let req = StorageRequirement::slots(Amount::from(PER_TOKEN), 2)
            .with_registration(Amount::from(1u64));
        // 1 + 10 = 11 -> 15
        assert_eq!(deposit(&req, None), Some(Amount::from(15u64)));
        // A total without `available` is still unregistered
        assert_eq!(deposit(&req, Some(balance(3, None))), Some(Amount::from(15u64)));
    }

    #[test]
    fn test_token_registration_only_when_absent() {
        let req = StorageRequirement::registration(Amount::from(125u64));
        assert_eq!(deposit(&req, None), Some(Amount::from(125u64)));
        assert_eq!(deposit(&req, Some(balance(125, Some(0)))), None);
    }

    #[test]
    fn test_zero_per_item_is_rejected() {
        let req = StorageRequirement::slots(Amount::ZERO, 1);
        assert_eq!(
            req.deposit_for(Some(&balance(0, Some(0)))),
            Err(AmountError::DivisionByZero)
        );
        assert_eq!(req.deposit_for(None), Err(AmountError::DivisionByZero));
        // Registration-only requirements carry their cost as per_item
        assert_eq!(
            StorageRequirement::registration(Amount::ZERO).deposit_for(Some(&balance(5, Some(5)))),
            Err(AmountError::DivisionByZero)
        );
    }

    #[tokio::test]
    async fn test_policy_is_idempotent_once_covered() {
        let exchange: AccountId = "v2.ref-finance.near".parse().unwrap();
        let alice: AccountId = "alice.near".parse().unwrap();
        let chain = MockChain::new().with_storage_balance(
            exchange.clone(),
            alice.clone(),
            Some((Amount::from(100u64), Some(Amount::from(10u64)))),
        );
        let queries = Queries::new(&chain, &exchange);
        let req = StorageRequirement::slots(Amount::from(PER_TOKEN), 2);

        for _ in 0..3 {
            let action = storage_deposit_action(&queries, &exchange, &alice, &req, Gas::from_tgas(30))
                .await
                .unwrap();
            assert!(action.is_none());
        }
    }

    #[tokio::test]
    async fn test_action_shape() {
        let token: AccountId = "wrap.near".parse().unwrap();
        let alice: AccountId = "alice.near".parse().unwrap();
        let chain = MockChain::new().with_storage_balance(token.clone(), alice.clone(), None);
        let queries = Queries::new(&chain, &token);

        let action = storage_deposit_action(
            &queries,
            &token,
            &alice,
            &StorageRequirement::registration(Amount::from(1250u64)),
            Gas::from_tgas(30),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(action.method, "storage_deposit");
        assert_eq!(action.attached_deposit, Amount::from(1250u64));
        assert_eq!(action.attached_gas, Gas::from_tgas(30));
        assert_eq!(
            action.args,
            json!({ "account_id": "alice.near", "registration_only": true })
        );
    }
}
