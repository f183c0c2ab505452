//! Deposit, add liquidity and stake in one batch

mod common;

use common::*;
use lagoon_recipes::deposit_add_liquidity_and_stake;
use lagoon_types::Amount;
use serde_json::json;

const AMOUNTS: [u64; 2] = [10, 20];

fn amounts() -> Vec<Amount> {
    AMOUNTS.iter().copied().map(amount).collect()
}

#[tokio::test]
async fn test_without_farm_is_four_transactions() {
    // Two slots already paid for
    let h = harness(chain().with_storage_balance(exchange(), alice(), registered(near("0.01"))));

    let batch = deposit_add_liquidity_and_stake(&h.session, POOL_ID, &amounts(), false)
        .await
        .unwrap();

    assert_eq!(
        shape(&batch),
        vec![
            tx("v2.ref-finance.near", &["register_tokens"]),
            tx("wrap.near", &["ft_transfer_call"]),
            tx("dai.near", &["ft_transfer_call"]),
            tx("v2.ref-finance.near", &["add_liquidity"]),
        ]
    );
    assert_eq!(nonces(&batch), vec![101, 102, 103, 104]);
    // Farm is never consulted when inactive
    assert_eq!(h.chain.view_count("storage_balance_of"), 1);
}

#[tokio::test]
async fn test_exchange_storage_merges_into_first_transaction() {
    let h = harness(chain().with_storage_balance(exchange(), alice(), registered(near("0.004"))));

    let batch = deposit_add_liquidity_and_stake(&h.session, POOL_ID, &amounts(), false)
        .await
        .unwrap();

    assert_eq!(batch.len(), 4);
    assert_eq!(batch[0].method_names(), vec!["storage_deposit", "register_tokens"]);
    // Two slots: 0.01 - 0.004 = 0.006, rounded up to 0.01
    assert_eq!(batch[0].actions[0].attached_deposit, near("0.01"));
}

#[tokio::test]
async fn test_with_farm_needing_storage_is_six_transactions() {
    let h = harness(
        chain()
            .with_storage_balance(exchange(), alice(), registered(near("0.01")))
            .with_storage_balance(farm(), alice(), None),
    );

    let batch = deposit_add_liquidity_and_stake(&h.session, POOL_ID, &amounts(), true)
        .await
        .unwrap();

    assert_eq!(
        shape(&batch),
        vec![
            tx("v2.ref-finance.near", &["register_tokens"]),
            tx("wrap.near", &["ft_transfer_call"]),
            tx("dai.near", &["ft_transfer_call"]),
            tx("v2.ref-finance.near", &["add_liquidity"]),
            tx("v2.ref-farming.near", &["storage_deposit"]),
            tx("v2.ref-finance.near", &["mft_transfer_call"]),
        ]
    );
    assert_eq!(batch[4].actions[0].attached_deposit, near("0.1"));
    assert_eq!(nonces(&batch), (101..=106).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_with_farm_already_registered_merges_stake_into_add_liquidity() {
    let h = harness(
        chain()
            .with_storage_balance(exchange(), alice(), registered(near("0.01")))
            .with_storage_balance(farm(), alice(), registered(near("0.1"))),
    );

    let batch = deposit_add_liquidity_and_stake(&h.session, POOL_ID, &amounts(), true)
        .await
        .unwrap();

    assert_eq!(
        shape(&batch),
        vec![
            tx("v2.ref-finance.near", &["register_tokens"]),
            tx("wrap.near", &["ft_transfer_call"]),
            tx("dai.near", &["ft_transfer_call"]),
            tx("v2.ref-finance.near", &["add_liquidity", "mft_transfer_call"]),
        ]
    );
    assert!(batch.windows(2).all(|w| w[0].receiver_id != w[1].receiver_id));
}

#[tokio::test]
async fn test_stakes_the_estimated_shares() {
    let h = harness(
        chain()
            .with_storage_balance(exchange(), alice(), registered(near("0.01")))
            .with_storage_balance(farm(), alice(), registered(near("0.1"))),
    );

    let batch = deposit_add_liquidity_and_stake(&h.session, POOL_ID, &amounts(), true)
        .await
        .unwrap();

    // floor(min(1e6 * 10 / 100, 1e6 * 20 / 200) * 997 / 1000)
    assert_eq!(
        batch[3].actions[1].args,
        json!({
            "receiver_id": "v2.ref-farming.near",
            "token_id": ":79",
            "amount": "99700",
            "msg": "",
        })
    );
    assert_eq!(
        batch[1].actions[0].args,
        json!({ "receiver_id": "v2.ref-finance.near", "amount": "10", "msg": "" })
    );
    assert_eq!(
        batch[2].actions[0].args,
        json!({ "receiver_id": "v2.ref-finance.near", "amount": "20", "msg": "" })
    );
}

#[tokio::test]
async fn test_no_transaction_is_ever_empty() {
    for farm_active in [false, true] {
        for exchange_available in ["0", "0.01"] {
            let h = harness(
                chain()
                    .with_storage_balance(exchange(), alice(), registered(near(exchange_available)))
                    .with_storage_balance(farm(), alice(), registered(near("0.1"))),
            );
            let batch = deposit_add_liquidity_and_stake(&h.session, POOL_ID, &amounts(), farm_active)
                .await
                .unwrap();
            assert!(batch.iter().all(|tx| !tx.actions.is_empty()));
            assert!(batch.iter().all(|tx| tx.block_hash == lagoon_chain::testing::MockChain::BLOCK_HASH));
        }
    }
}
