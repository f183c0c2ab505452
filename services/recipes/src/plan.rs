//! Declarative transaction plans
//!
//! A step describes its output as an ordered list of [`Stage`]s. Each stage
//! targets one receiver and is either always present or gated by a flag.
//! Disabled and empty stages drop out, then consecutive stages on the same
//! receiver merge into a single transaction, so a conditional storage
//! deposit rides along with the call that needs it.
//!
//! Actions in one transaction fail together, so merged stages on one
//! receiver succeed or revert as a unit.

use crate::Session;
use lagoon_chain::TransactionPlan;
use lagoon_types::{AccountId, Action, Transaction};
use tracing::debug;

/// Actions on one receiver, optionally gated
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    receiver: AccountId,
    actions: Vec<Action>,
    enabled: bool,
}

impl Stage {
    pub fn always(receiver: AccountId, actions: impl IntoIterator<Item = Action>) -> Self {
        Self::when(true, receiver, actions)
    }

    pub fn when(enabled: bool, receiver: AccountId, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            receiver,
            actions: actions.into_iter().collect(),
            enabled,
        }
    }

    fn is_live(&self) -> bool {
        self.enabled && !self.actions.is_empty()
    }
}

/// Ordered stages for one user step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    stages: Vec<Stage>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append another plan's stages after this one's
    pub fn chain(mut self, other: Plan) -> Self {
        self.stages.extend(other.stages);
        self
    }

    /// Live stages merged into per-receiver transaction plans, in order
    pub fn into_transaction_plans(self) -> Vec<TransactionPlan> {
        let mut plans: Vec<TransactionPlan> = Vec::new();
        for stage in self.stages.into_iter().filter(Stage::is_live) {
            match plans.last_mut() {
                Some(last) if last.receiver_id == stage.receiver => {
                    last.actions.extend(stage.actions)
                }
                _ => plans.push(TransactionPlan {
                    receiver_id: stage.receiver,
                    actions: stage.actions,
                }),
            }
        }
        plans
    }

    /// Build the unsigned transactions for `session`'s account
    pub async fn build(self, session: &Session) -> crate::Result<Vec<Transaction>> {
        let plans = self.into_transaction_plans();
        debug!(
            account = %session.account_id(),
            transactions = plans.len(),
            "building plan"
        );
        Ok(session.builder().build_batch(plans).await?)
    }
}
