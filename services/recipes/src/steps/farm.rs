//! Staking LP shares as farm seeds

use super::{farm_storage, require_positive};
use crate::plan::{Plan, Stage};
use crate::{Result, Session};
use lagoon_types::{share_token_id, AccountId, Action, Amount, PoolId, Transaction};
use serde_json::json;
use tracing::info;

/// Farm seed id for a pool's LP shares: `<exchange>@<pool_id>`
pub fn farm_seed_id(exchange: &AccountId, pool_id: PoolId) -> String {
    format!("{exchange}@{pool_id}")
}

/// farm: `[storage_deposit?]` then exchange: `mft_transfer_call` of `shares`
/// into the farm, as two gated stages
pub(crate) fn stake_stages(
    session: &Session,
    enabled: bool,
    storage: Option<Action>,
    pool_id: PoolId,
    shares: Amount,
) -> [Stage; 2] {
    let contracts = session.contracts();
    let transfer = Action::call(
        "mft_transfer_call",
        json!({
            "receiver_id": contracts.farm,
            "token_id": share_token_id(pool_id),
            "amount": shares,
            "msg": "",
        }),
        session.gas(|g| g.mft_transfer_call),
    )
    .one_yocto();

    [
        Stage::when(enabled, contracts.farm.clone(), storage),
        Stage::when(enabled, contracts.exchange.clone(), [transfer]),
    ]
}

pub async fn stake_lp_plan(session: &Session, pool_id: PoolId, shares: Amount) -> Result<Plan> {
    require_positive(shares, "shares")?;
    let storage = farm_storage(session).await?;

    info!(account = %session.account_id(), pool_id, %shares, "stake lp shares");
    let [storage_stage, transfer_stage] = stake_stages(session, true, storage, pool_id, shares);
    Ok(Plan::new().then(storage_stage).then(transfer_stage))
}

pub async fn stake_lp(session: &Session, pool_id: PoolId, shares: Amount) -> Result<Vec<Transaction>> {
    stake_lp_plan(session, pool_id, shares).await?.build(session).await
}

/// farm: `withdraw_seed` (1 yocto)
pub fn unstake_lp_plan(session: &Session, pool_id: PoolId, shares: Amount) -> Result<Plan> {
    require_positive(shares, "shares")?;
    let contracts = session.contracts();
    let withdraw = Action::call(
        "withdraw_seed",
        json!({
            "seed_id": farm_seed_id(&contracts.exchange, pool_id),
            "amount": shares,
        }),
        session.gas(|g| g.farm_call),
    )
    .one_yocto();

    info!(account = %session.account_id(), pool_id, %shares, "unstake lp shares");
    Ok(Plan::new().then(Stage::always(contracts.farm.clone(), [withdraw])))
}

pub async fn unstake_lp(session: &Session, pool_id: PoolId, shares: Amount) -> Result<Vec<Transaction>> {
    unstake_lp_plan(session, pool_id, shares)?.build(session).await
}
