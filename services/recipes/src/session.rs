//! Per-user context threaded through every step

use lagoon_chain::{ChainView, NonceSequencer, Queries, TransactionBuilder};
use lagoon_config::{ContractAddresses, Economics, NetworkConfig};
use lagoon_types::{AccountId, Gas};
use std::sync::Arc;

/// Who is acting, against which network, through which chain view
///
/// Cheap to clone; clones share the nonce sequencer, so steps built from
/// clones of one session never reuse a nonce.
#[derive(Clone)]
pub struct Session {
    account_id: AccountId,
    view: Arc<dyn ChainView>,
    config: Arc<NetworkConfig>,
    sequencer: Arc<NonceSequencer>,
}

impl Session {
    pub fn new(account_id: AccountId, view: Arc<dyn ChainView>, config: NetworkConfig) -> Self {
        Self {
            account_id,
            view,
            config: Arc::new(config),
            sequencer: Arc::new(NonceSequencer::new()),
        }
    }

    /// Share a sequencer with other sessions signing for the same account
    pub fn with_sequencer(mut self, sequencer: Arc<NonceSequencer>) -> Self {
        self.sequencer = sequencer;
        self
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn contracts(&self) -> &ContractAddresses {
        &self.config.contracts
    }

    pub fn economics(&self) -> &Economics {
        &self.config.economics
    }

    pub fn sequencer(&self) -> &Arc<NonceSequencer> {
        &self.sequencer
    }

    pub fn queries(&self) -> Queries<'_> {
        Queries::new(self.view.as_ref(), &self.config.contracts.exchange)
    }

    pub fn builder(&self) -> TransactionBuilder {
        TransactionBuilder::new(
            Arc::clone(&self.view),
            Arc::clone(&self.sequencer),
            self.account_id.clone(),
        )
    }

    /// Gas for a call kind, from the configured budget
    pub fn gas(&self, select: impl FnOnce(&lagoon_config::GasBudget) -> u64) -> Gas {
        Gas::from_tgas(select(&self.config.gas))
    }
}
