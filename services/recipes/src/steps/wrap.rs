//! Native NEAR: wrapping and liquid staking

use super::{require_positive, token_registration};
use crate::plan::{Plan, Stage};
use crate::{Result, Session};
use lagoon_types::{Action, Amount, Transaction};
use serde_json::json;
use tracing::info;

pub(crate) fn near_deposit(session: &Session, amount: Amount) -> Action {
    Action::call("near_deposit", json!({}), session.gas(|g| g.wrap)).with_deposit(amount)
}

/// wNEAR: `[storage_deposit?]`, `near_deposit`
pub async fn wrap_near_plan(session: &Session, amount: Amount) -> Result<Plan> {
    require_positive(amount, "wrap amount")?;
    let wrap = &session.contracts().wrap_near;
    let registration = token_registration(session, wrap).await?;

    info!(account = %session.account_id(), %amount, "wrap near");
    Ok(Plan::new().then(Stage::always(
        wrap.clone(),
        registration.into_iter().chain([near_deposit(session, amount)]),
    )))
}

pub async fn wrap_near(session: &Session, amount: Amount) -> Result<Vec<Transaction>> {
    wrap_near_plan(session, amount).await?.build(session).await
}

/// wNEAR: `near_withdraw` (1 yocto)
pub fn unwrap_near_plan(session: &Session, amount: Amount) -> Result<Plan> {
    require_positive(amount, "unwrap amount")?;
    let withdraw = Action::call(
        "near_withdraw",
        json!({ "amount": amount }),
        session.gas(|g| g.wrap),
    )
    .one_yocto();

    Ok(Plan::new().then(Stage::always(session.contracts().wrap_near.clone(), [withdraw])))
}

pub async fn unwrap_near(session: &Session, amount: Amount) -> Result<Vec<Transaction>> {
    unwrap_near_plan(session, amount)?.build(session).await
}

/// Staking pool: `deposit_and_stake` with the NEAR attached
pub fn stake_near_plan(session: &Session, amount: Amount) -> Result<Plan> {
    require_positive(amount, "stake amount")?;
    let stake = Action::call("deposit_and_stake", json!({}), session.gas(|g| g.stake)).with_deposit(amount);

    info!(account = %session.account_id(), pool = %session.contracts().staking_pool, %amount, "stake near");
    Ok(Plan::new().then(Stage::always(session.contracts().staking_pool.clone(), [stake])))
}

pub async fn stake_near(session: &Session, amount: Amount) -> Result<Vec<Transaction>> {
    stake_near_plan(session, amount)?.build(session).await
}
