//! User-facing steps
//!
//! Every step comes in two forms: `*_plan` returns the declarative [`Plan`]
//! so composite recipes can chain steps, and the plain function builds it
//! into unsigned transactions for the session's account.

pub mod exchange;
pub mod farm;
pub mod liquidity;
pub mod recipes;
pub mod swap;
pub mod wrap;

use crate::{RecipeError, Result, Session};
use lagoon_chain::{storage_deposit_action, StorageRequirement};
use lagoon_types::{AccountId, Action, Amount};
use serde_json::json;

pub(crate) fn require_positive(amount: Amount, what: &str) -> Result<()> {
    if amount.is_zero() {
        return Err(RecipeError::invalid(format!("{what} must be greater than zero")));
    }
    Ok(())
}

/// Storage top-up on the exchange for `items` new token slots
pub(crate) async fn exchange_storage(session: &Session, items: u32) -> Result<Option<Action>> {
    let economics = session.economics();
    let requirement = StorageRequirement::slots(economics.min_deposit_per_token, items)
        .with_registration(economics.new_account_storage_cost);
    storage(session, &session.contracts().exchange, &requirement).await
}

/// NEP-141 registration of the session account on `token`
pub(crate) async fn token_registration(session: &Session, token: &AccountId) -> Result<Option<Action>> {
    let requirement = StorageRequirement::registration(session.economics().new_account_storage_cost);
    storage(session, token, &requirement).await
}

/// Farm storage for one seed
pub(crate) async fn farm_storage(session: &Session) -> Result<Option<Action>> {
    let requirement = StorageRequirement::slots(session.economics().farm_storage_balance, 1);
    storage(session, &session.contracts().farm, &requirement).await
}

async fn storage(
    session: &Session,
    contract: &AccountId,
    requirement: &StorageRequirement,
) -> Result<Option<Action>> {
    Ok(storage_deposit_action(
        &session.queries(),
        contract,
        session.account_id(),
        requirement,
        session.gas(|g| g.storage_deposit),
    )
    .await?)
}

/// `ft_transfer_call` of `amount` into `receiver` with `msg`
pub(crate) fn ft_transfer_call(session: &Session, receiver: &AccountId, amount: Amount, msg: String) -> Action {
    Action::call(
        "ft_transfer_call",
        json!({
            "receiver_id": receiver,
            "amount": amount,
            "msg": msg,
        }),
        session.gas(|g| g.ft_transfer_call),
    )
    .one_yocto()
}
