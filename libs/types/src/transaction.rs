//! Contract calls, access keys and unsigned transactions

use crate::{Amount, PoolId};
use near_sdk::{AccountId, CryptoHash, Gas, PublicKey};
use serde::{Deserialize, Serialize};

/// Exactly one yoctoNEAR, the deposit contracts demand as proof of a
/// full-access signature on sensitive calls
pub const ONE_YOCTO: Amount = Amount::from_u128(1);

/// A single function call on the transaction's receiver
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub method: String,
    /// JSON arguments, serialized to bytes only when the transaction is encoded
    pub args: serde_json::Value,
    pub attached_gas: Gas,
    pub attached_deposit: Amount,
}

impl Action {
    /// Call with no deposit
    pub fn call(method: impl Into<String>, args: serde_json::Value, gas: Gas) -> Self {
        Self {
            method: method.into(),
            args,
            attached_gas: gas,
            attached_deposit: Amount::ZERO,
        }
    }

    pub fn with_deposit(mut self, deposit: Amount) -> Self {
        self.attached_deposit = deposit;
        self
    }

    /// Attach [`ONE_YOCTO`]
    pub fn one_yocto(self) -> Self {
        self.with_deposit(ONE_YOCTO)
    }
}

/// Key that may sign for an account, with the nonce last used on chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessKey {
    pub public_key: PublicKey,
    pub nonce: u64,
}

/// Unsigned transaction: ordered calls on one receiver
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub signer_id: AccountId,
    pub public_key: PublicKey,
    pub receiver_id: AccountId,
    pub nonce: u64,
    pub block_hash: CryptoHash,
    pub actions: Vec<Action>,
}

impl Transaction {
    /// Sum of all deposits the signer will attach
    pub fn total_deposit(&self) -> Result<Amount, crate::AmountError> {
        self.actions
            .iter()
            .try_fold(Amount::ZERO, |acc, a| acc.checked_add(a.attached_deposit))
    }

    pub fn method_names(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.method.as_str()).collect()
    }
}

/// One hop of an exchange swap, as the exchange's `actions` payload expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAction {
    pub pool_id: PoolId,
    pub token_in: AccountId,
    pub token_out: AccountId,
    pub amount_in: Amount,
    pub min_amount_out: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_swap_action_wire_shape() {
        let swap = SwapAction {
            pool_id: 3,
            token_in: "wrap.near".parse().unwrap(),
            token_out: "dai.near".parse().unwrap(),
            amount_in: Amount::from(1_000u64),
            min_amount_out: Amount::from(999u64),
        };
        assert_eq!(
            serde_json::to_value(&swap).unwrap(),
            json!({
                "pool_id": 3,
                "token_in": "wrap.near",
                "token_out": "dai.near",
                "amount_in": "1000",
                "min_amount_out": "999",
            })
        );
    }

    #[test]
    fn test_total_deposit() {
        let tx = Transaction {
            signer_id: "alice.near".parse().unwrap(),
            public_key: "ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp".parse().unwrap(),
            receiver_id: "wrap.near".parse().unwrap(),
            nonce: 1,
            block_hash: [0; 32],
            actions: vec![
                Action::call("storage_deposit", json!({}), Gas::from_tgas(30))
                    .with_deposit(Amount::from(1250u64)),
                Action::call("ft_transfer_call", json!({}), Gas::from_tgas(180)).one_yocto(),
            ],
        };
        assert_eq!(tx.total_deposit().unwrap(), Amount::from(1251u64));
        assert_eq!(tx.method_names(), vec!["storage_deposit", "ft_transfer_call"]);
    }
}
