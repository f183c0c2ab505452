//! Moving tokens in and out of the exchange

use super::wrap::near_deposit;
use super::{exchange_storage, ft_transfer_call, require_positive, token_registration};
use crate::plan::{Plan, Stage};
use crate::{RecipeError, Result, Session};
use lagoon_types::{AccountId, Action, Amount, Transaction};
use serde_json::json;
use std::collections::HashSet;
use tracing::{debug, info};

/// exchange: `[storage_deposit?]`; wNEAR: `[storage_deposit?]`, `near_deposit`,
/// `ft_transfer_call` into the exchange
pub async fn wrap_and_deposit_plan(session: &Session, amount: Amount) -> Result<Plan> {
    require_positive(amount, "deposit amount")?;
    let contracts = session.contracts();

    let (exchange_deposit, wrap_registration) = futures::try_join!(
        exchange_storage(session, 1),
        token_registration(session, &contracts.wrap_near),
    )?;

    info!(account = %session.account_id(), %amount, "wrap and deposit");
    Ok(Plan::new()
        .then(Stage::always(contracts.exchange.clone(), exchange_deposit))
        .then(Stage::always(
            contracts.wrap_near.clone(),
            wrap_registration.into_iter().chain([
                near_deposit(session, amount),
                ft_transfer_call(session, &contracts.exchange, amount, String::new()),
            ]),
        )))
}

pub async fn wrap_and_deposit(session: &Session, amount: Amount) -> Result<Vec<Transaction>> {
    wrap_and_deposit_plan(session, amount).await?.build(session).await
}

fn validate_tokens(tokens: &[(AccountId, Amount)]) -> Result<()> {
    if tokens.is_empty() {
        return Err(RecipeError::invalid("no tokens to deposit"));
    }
    let mut seen = HashSet::new();
    for (token, amount) in tokens {
        require_positive(*amount, "deposit amount")?;
        if !seen.insert(token) {
            return Err(RecipeError::invalid(format!("token {token} listed twice")));
        }
    }
    Ok(())
}

/// exchange: `[storage_deposit for N tokens?]`, `register_tokens`; then one
/// `ft_transfer_call` per token
///
/// The storage check covers all N tokens in one evaluation.
pub async fn deposit_tokens_plan(session: &Session, tokens: &[(AccountId, Amount)]) -> Result<Plan> {
    validate_tokens(tokens)?;
    let items = u32::try_from(tokens.len()).map_err(|_| RecipeError::invalid("too many tokens"))?;

    let storage = exchange_storage(session, items).await?;
    debug!(account = %session.account_id(), tokens = tokens.len(), storage = storage.is_some(), "deposit tokens");
    Ok(deposit_stages(session, storage, tokens))
}

/// exchange: `[storage]`, `register_tokens`; then one `ft_transfer_call` per token
pub(crate) fn deposit_stages(session: &Session, storage: Option<Action>, tokens: &[(AccountId, Amount)]) -> Plan {
    let exchange = &session.contracts().exchange;
    let register = Action::call(
        "register_tokens",
        json!({ "token_ids": tokens.iter().map(|(t, _)| t).collect::<Vec<_>>() }),
        session.gas(|g| g.exchange_call),
    )
    .one_yocto();

    let mut plan = Plan::new().then(Stage::always(exchange.clone(), storage.into_iter().chain([register])));
    for (token, amount) in tokens {
        plan = plan.then(Stage::always(
            token.clone(),
            [ft_transfer_call(session, exchange, *amount, String::new())],
        ));
    }
    plan
}

pub async fn deposit_tokens(session: &Session, tokens: &[(AccountId, Amount)]) -> Result<Vec<Transaction>> {
    deposit_tokens_plan(session, tokens).await?.build(session).await
}

/// token: `[storage_deposit(registration)?]`; exchange: `withdraw` (1 yocto)
///
/// `None` withdraws the whole deposit of `token`.
pub async fn withdraw_token_plan(session: &Session, token: &AccountId, amount: Option<Amount>) -> Result<Plan> {
    let queries = session.queries();
    let resolve_amount = async {
        match amount {
            Some(amount) => Ok::<_, RecipeError>(amount),
            None => {
                let deposits = queries.get_deposits(session.account_id()).await?;
                deposits
                    .get(token)
                    .copied()
                    .ok_or_else(|| RecipeError::UnknownToken {
                        token: token.clone(),
                        location: "exchange deposits".to_string(),
                    })
            }
        }
    };

    let (registration, amount) = futures::try_join!(token_registration(session, token), resolve_amount)?;
    require_positive(amount, "withdraw amount")?;

    let withdraw = Action::call(
        "withdraw",
        json!({
            "token_id": token,
            "amount": amount,
            "unregister": false,
        }),
        session.gas(|g| g.exchange_call),
    )
    .one_yocto();

    info!(account = %session.account_id(), %token, %amount, "withdraw token");
    Ok(Plan::new()
        .then(Stage::always(token.clone(), registration))
        .then(Stage::always(session.contracts().exchange.clone(), [withdraw])))
}

pub async fn withdraw_token(session: &Session, token: &AccountId, amount: Option<Amount>) -> Result<Vec<Transaction>> {
    withdraw_token_plan(session, token, amount).await?.build(session).await
}
