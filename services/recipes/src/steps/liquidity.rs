//! Adding and removing pool liquidity

use super::{exchange_storage, require_positive};
use crate::plan::{Plan, Stage};
use crate::{RecipeError, Result, Session};
use lagoon_amm::LiquidityPool;
use lagoon_types::{Action, Amount, Pool, PoolId, Transaction};
use serde_json::json;
use tracing::info;

/// Check `amounts` line up with the pool's tokens and estimate the shares
/// they mint
pub(crate) fn estimate_shares(pool: &Pool, amounts: &[Amount]) -> Result<Amount> {
    if amounts.len() != pool.token_account_ids.len() {
        return Err(RecipeError::invalid(format!(
            "pool {} has {} tokens but {} amounts were given",
            pool.id,
            pool.token_account_ids.len(),
            amounts.len()
        )));
    }
    for amount in amounts {
        require_positive(*amount, "liquidity amount")?;
    }
    Ok(pool.estimate_shares(amounts)?)
}

/// `add_liquidity` with the LP storage deposit attached
pub(crate) fn add_liquidity_action(session: &Session, pool_id: PoolId, amounts: &[Amount]) -> Action {
    Action::call(
        "add_liquidity",
        json!({ "pool_id": pool_id, "amounts": amounts }),
        session.gas(|g| g.exchange_call),
    )
    .with_deposit(session.economics().lp_storage_deposit)
}

/// exchange: `[storage_deposit?]`, `add_liquidity`
///
/// `amounts` are in pool token order and must already be deposited.
pub async fn add_liquidity_plan(session: &Session, pool_id: PoolId, amounts: &[Amount]) -> Result<Plan> {
    let queries = session.queries();
    let (pool, registration) = futures::try_join!(
        async { Ok::<_, RecipeError>(queries.get_pool(pool_id).await?) },
        exchange_storage(session, 0),
    )?;

    let estimated = estimate_shares(&pool, amounts)?;
    info!(account = %session.account_id(), pool_id, %estimated, "add liquidity");

    Ok(Plan::new().then(Stage::always(
        session.contracts().exchange.clone(),
        registration
            .into_iter()
            .chain([add_liquidity_action(session, pool_id, amounts)]),
    )))
}

pub async fn add_liquidity(session: &Session, pool_id: PoolId, amounts: &[Amount]) -> Result<Vec<Transaction>> {
    add_liquidity_plan(session, pool_id, amounts).await?.build(session).await
}

/// exchange: `remove_liquidity` with slippage-protected minimum amounts
///
/// `None` burns every share the account holds in the pool.
pub async fn remove_liquidity_plan(session: &Session, pool_id: PoolId, shares: Option<Amount>) -> Result<Plan> {
    let queries = session.queries();
    let resolve_shares = async {
        match shares {
            Some(shares) => Ok(shares),
            None => queries.get_pool_shares(pool_id, session.account_id()).await,
        }
    };

    let (pool, shares) = futures::try_join!(queries.get_pool(pool_id), resolve_shares)?;
    require_positive(shares, "shares")?;
    let min_amounts = pool.min_amounts_for_shares(shares)?;

    info!(
        account = %session.account_id(),
        pool_id,
        %shares,
        min_amounts = ?min_amounts,
        "remove liquidity"
    );

    let remove = Action::call(
        "remove_liquidity",
        json!({
            "pool_id": pool_id,
            "shares": shares,
            "min_amounts": min_amounts,
        }),
        session.gas(|g| g.exchange_call),
    )
    .one_yocto();

    Ok(Plan::new().then(Stage::always(session.contracts().exchange.clone(), [remove])))
}

pub async fn remove_liquidity(session: &Session, pool_id: PoolId, shares: Option<Amount>) -> Result<Vec<Transaction>> {
    remove_liquidity_plan(session, pool_id, shares).await?.build(session).await
}
