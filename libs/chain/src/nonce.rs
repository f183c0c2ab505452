//! Per-access-key nonce sequencing
//!
//! Transactions built from the same access key before any of them lands on
//! chain would all read the same on-chain nonce. The sequencer hands out
//! `max(last_reserved, chain_nonce) + 1` under the map's entry lock, so two
//! reservations for one key can never return the same value.
//!
//! Reserved nonces that are never used (the wallet rejected the batch) only
//! leave a gap; the chain accepts any nonce above the current one.

use dashmap::DashMap;
use lagoon_types::{AccessKey, AccountId, PublicKey};
use tracing::trace;

/// Strictly increasing nonce allocation per `(account, public key)`
#[derive(Debug, Default)]
pub struct NonceSequencer {
    reserved: DashMap<(AccountId, PublicKey), u64>,
}

impl NonceSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next nonce for `key`, whose `nonce` is the on-chain value
    pub fn reserve(&self, account: &AccountId, key: &AccessKey) -> u64 {
        let mut entry = self
            .reserved
            .entry((account.clone(), key.public_key.clone()))
            .or_insert(key.nonce);
        let next = (*entry).max(key.nonce) + 1;
        *entry = next;
        trace!(%account, chain_nonce = key.nonce, nonce = next, "nonce reserved");
        next
    }

    /// Last nonce handed out for this key, if any
    pub fn last_reserved(&self, account: &AccountId, public_key: &PublicKey) -> Option<u64> {
        self.reserved
            .get(&(account.clone(), public_key.clone()))
            .map(|entry| *entry)
    }

    /// Drop local state for a key once the chain is authoritative again
    pub fn forget(&self, account: &AccountId, public_key: &PublicKey) {
        self.reserved.remove(&(account.clone(), public_key.clone()));
    }
}
