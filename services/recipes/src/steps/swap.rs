//! Single-pool swaps through `ft_transfer_call`

use super::{ft_transfer_call, require_positive, token_registration};
use crate::plan::{Plan, Stage};
use crate::{RecipeError, Result, Session};
use lagoon_amm::{pool_output_for_input, Haircut};
use lagoon_types::{AccountId, Amount, PoolId, SwapAction, Transaction};
use serde_json::json;
use tracing::info;

/// token_out: `[storage_deposit(registration)?]`; token_in: `ft_transfer_call`
/// into the exchange carrying the swap
///
/// The minimum output is the exchange's own quote less 0.1%.
pub async fn swap_plan(
    session: &Session,
    pool_id: PoolId,
    token_in: &AccountId,
    amount_in: Amount,
    token_out: &AccountId,
) -> Result<Plan> {
    require_positive(amount_in, "swap amount")?;
    if token_in == token_out {
        return Err(RecipeError::invalid(format!("cannot swap {token_in} for itself")));
    }

    let queries = session.queries();
    let (pool, quote, registration) = futures::try_join!(
        async { Ok::<_, RecipeError>(queries.get_pool(pool_id).await?) },
        async { Ok::<_, RecipeError>(pool_output_for_input(&queries, pool_id, token_in, amount_in, token_out).await?) },
        token_registration(session, token_out),
    )?;

    for token in [token_in, token_out] {
        if pool.token_index(token).is_none() {
            return Err(RecipeError::UnknownToken {
                token: token.clone(),
                location: format!("pool {pool_id}"),
            });
        }
    }
    if quote.is_zero() {
        return Err(RecipeError::invalid(format!(
            "pool {pool_id} quotes nothing for {amount_in} {token_in}"
        )));
    }

    let min_amount_out = Haircut::SLIPPAGE.apply(quote)?;

    let action = SwapAction {
        pool_id,
        token_in: token_in.clone(),
        token_out: token_out.clone(),
        amount_in,
        min_amount_out,
    };
    let msg = json!({ "force": 0, "actions": [action] }).to_string();

    info!(
        account = %session.account_id(),
        pool_id,
        %token_in,
        %amount_in,
        %token_out,
        %quote,
        %min_amount_out,
        "swap"
    );

    Ok(Plan::new()
        .then(Stage::always(token_out.clone(), registration))
        .then(Stage::always(
            token_in.clone(),
            [ft_transfer_call(session, &session.contracts().exchange, amount_in, msg)],
        )))
}

pub async fn swap(
    session: &Session,
    pool_id: PoolId,
    token_in: &AccountId,
    amount_in: Amount,
    token_out: &AccountId,
) -> Result<Vec<Transaction>> {
    swap_plan(session, pool_id, token_in, amount_in, token_out)
        .await?
        .build(session)
        .await
}
