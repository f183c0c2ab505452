//! Shared fixtures for recipe integration tests

#![allow(dead_code)]

use lagoon_chain::testing::MockChain;
use lagoon_config::NetworkConfig;
use lagoon_recipes::Session;
use lagoon_types::{AccessKey, AccountId, Amount, Pool, Transaction};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const POOL_ID: u64 = 79;
pub const CHAIN_NONCE: u64 = 100;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn account(id: &str) -> AccountId {
    id.parse().unwrap()
}

pub fn alice() -> AccountId {
    account("alice.near")
}

pub fn exchange() -> AccountId {
    account("v2.ref-finance.near")
}

pub fn farm() -> AccountId {
    account("v2.ref-farming.near")
}

pub fn wrap() -> AccountId {
    account("wrap.near")
}

pub fn dai() -> AccountId {
    account("dai.near")
}

pub fn near(value: &str) -> Amount {
    Amount::parse_units(value, 24).unwrap()
}

pub fn amount(value: u64) -> Amount {
    Amount::from(value)
}

pub fn key(nonce: u64) -> AccessKey {
    AccessKey {
        public_key: "ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp".parse().unwrap(),
        nonce,
    }
}

/// wNEAR/DAI pool: reserves 100/200, one million shares
pub fn pool() -> Pool {
    Pool {
        id: POOL_ID,
        pool_kind: "SIMPLE_POOL".to_string(),
        token_account_ids: vec![wrap(), dai()],
        token_amounts: vec![amount(100), amount(200)],
        fee: 30,
        total_shares: amount(1_000_000),
    }
}

/// Chain where alice has a full access key and the pool exists
pub fn chain() -> MockChain {
    MockChain::new()
        .with_full_access_key(alice(), key(CHAIN_NONCE))
        .with_pool(exchange(), &pool())
}

/// Registered with `available` storage left
pub fn registered(available: Amount) -> Option<(Amount, Option<Amount>)> {
    Some((near("1"), Some(available)))
}

pub struct Harness {
    pub chain: Arc<MockChain>,
    pub session: Session,
}

pub fn harness(chain: MockChain) -> Harness {
    init_logging();
    let chain = Arc::new(chain);
    let config = NetworkConfig::for_network("mainnet").unwrap();
    let session = Session::new(alice(), chain.clone(), config);
    Harness { chain, session }
}

/// `(receiver, [method, ...])` per transaction
pub fn shape(batch: &[Transaction]) -> Vec<(String, Vec<String>)> {
    batch
        .iter()
        .map(|tx| {
            (
                tx.receiver_id.to_string(),
                tx.actions.iter().map(|a| a.method.clone()).collect(),
            )
        })
        .collect()
}

pub fn tx(receiver: &str, methods: &[&str]) -> (String, Vec<String>) {
    (
        receiver.to_string(),
        methods.iter().map(|m| m.to_string()).collect(),
    )
}

pub fn nonces(batch: &[Transaction]) -> Vec<u64> {
    batch.iter().map(|t| t.nonce).collect()
}
