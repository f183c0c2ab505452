//! Multi-step recipes composed from the single steps

use super::exchange::deposit_stages;
use super::farm::stake_stages;
use super::liquidity::{add_liquidity_action, estimate_shares};
use super::{exchange_storage, farm_storage};
use crate::plan::{Plan, Stage};
use crate::{RecipeError, Result, Session};
use lagoon_types::{Amount, PoolId, Transaction};
use tracing::info;

/// Deposit both pool tokens, add them as liquidity and, when a farm is
/// active, stake the estimated shares
///
/// ```text
/// exchange  [storage_deposit?] register_tokens
/// token A   ft_transfer_call
/// token B   ft_transfer_call
/// exchange  add_liquidity
/// farm      [storage_deposit?]      (farm_active)
/// exchange  mft_transfer_call       (farm_active)
/// ```
///
/// Without a farm storage deposit the stake merges into the `add_liquidity`
/// transaction.
///
/// The staked amount is the 99.7% share estimate, not the shares actually
/// minted; any remainder stays unstaked on the exchange.
pub async fn deposit_add_liquidity_and_stake_plan(
    session: &Session,
    pool_id: PoolId,
    amounts: &[Amount],
    farm_active: bool,
) -> Result<Plan> {
    let queries = session.queries();
    let items = u32::try_from(amounts.len()).map_err(|_| RecipeError::invalid("too many amounts"))?;

    let (pool, exchange_deposit, farm_deposit) = futures::try_join!(
        async { Ok::<_, RecipeError>(queries.get_pool(pool_id).await?) },
        exchange_storage(session, items),
        async {
            if farm_active {
                farm_storage(session).await
            } else {
                Ok(None)
            }
        },
    )?;

    let shares = estimate_shares(&pool, amounts)?;
    let tokens: Vec<_> = pool
        .token_account_ids
        .iter()
        .cloned()
        .zip(amounts.iter().copied())
        .collect();

    info!(
        account = %session.account_id(),
        pool_id,
        estimated_shares = %shares,
        farm_active,
        "deposit, add liquidity and stake"
    );

    let [farm_storage_stage, stake_stage] = stake_stages(session, farm_active, farm_deposit, pool_id, shares);
    Ok(deposit_stages(session, exchange_deposit, &tokens)
        .then(Stage::always(
            session.contracts().exchange.clone(),
            [add_liquidity_action(session, pool_id, amounts)],
        ))
        .then(farm_storage_stage)
        .then(stake_stage))
}

pub async fn deposit_add_liquidity_and_stake(
    session: &Session,
    pool_id: PoolId,
    amounts: &[Amount],
    farm_active: bool,
) -> Result<Vec<Transaction>> {
    deposit_add_liquidity_and_stake_plan(session, pool_id, amounts, farm_active)
        .await?
        .build(session)
        .await
}
