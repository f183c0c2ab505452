//! Hand-off of unsigned transaction batches to an external wallet
//!
//! The core never signs. A batch is awaited in full, flattened in order and
//! passed to a [`WalletSigner`]; what the wallet does with it (and whether
//! the user comes back) is outside this crate's view.

use crate::ChainError;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use lagoon_types::{AccountId, Action, PublicKey, Transaction};
use near_sdk::borsh::{self, io, BorshSerialize};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, info, trace};
use url::Url;

/// Receives ordered unsigned transactions plus where to send the user after
#[async_trait]
pub trait WalletSigner: Send + Sync {
    async fn request_sign(&self, transactions: Vec<Transaction>, return_location: Url) -> Result<(), ChainError>;
}

/// Moves the user agent to a URL (browser location, deep link, ...)
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: Url) -> Result<(), ChainError>;
}

/// Await every pending step, flatten the results in order and request one
/// signature for the whole sequence
///
/// Steps reserve nonces when they finish, which need not be the order they
/// appear in. Before the hand-off each key's reserved nonces are reassigned
/// ascending along the flattened sequence, so the wallet submitting in order
/// never sends a lower nonce after a higher one.
///
/// Returns the batch that was handed off. Nothing is sent when every step
/// came back empty.
pub async fn hand_off<S, F, E>(signer: &S, pending: Vec<F>, return_location: Url) -> Result<Vec<Transaction>, E>
where
    S: WalletSigner + ?Sized,
    F: Future<Output = Result<Vec<Transaction>, E>>,
    E: From<ChainError>,
{
    let mut batch: Vec<Transaction> = try_join_all(pending).await?.into_iter().flatten().collect();
    sequence_nonces(&mut batch);

    if batch.is_empty() {
        debug!("nothing to sign");
        return Ok(batch);
    }

    info!(count = batch.len(), callback = %return_location, "handing batch to wallet");
    signer.request_sign(batch.clone(), return_location).await?;
    Ok(batch)
}

/// Reassign each `(signer, key)`'s nonces in ascending order of position
///
/// The set of nonces per key is unchanged; only their order follows the batch.
pub fn sequence_nonces(batch: &mut [Transaction]) {
    let mut by_key: HashMap<(AccountId, PublicKey), Vec<usize>> = HashMap::new();
    for (index, tx) in batch.iter().enumerate() {
        by_key
            .entry((tx.signer_id.clone(), tx.public_key.clone()))
            .or_default()
            .push(index);
    }

    for ((signer, _), positions) in by_key {
        let mut nonces: Vec<u64> = positions.iter().map(|&i| batch[i].nonce).collect();
        nonces.sort_unstable();
        for (&i, nonce) in positions.iter().zip(nonces) {
            if batch[i].nonce != nonce {
                trace!(%signer, receiver = %batch[i].receiver_id, from = batch[i].nonce, to = nonce, "nonce resequenced");
                batch[i].nonce = nonce;
            }
        }
    }
}

const FUNCTION_CALL_TAG: u8 = 2;

/// `FunctionCall` variant of the chain's action enum
struct WireFunctionCall {
    method_name: String,
    args: Vec<u8>,
    gas: u64,
    deposit: u128,
}

impl BorshSerialize for WireFunctionCall {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        FUNCTION_CALL_TAG.serialize(writer)?;
        self.method_name.serialize(writer)?;
        self.args.serialize(writer)?;
        self.gas.serialize(writer)?;
        self.deposit.serialize(writer)
    }
}

/// Transaction in the chain's canonical binary layout
struct WireTransaction {
    signer_id: String,
    /// Curve tag followed by key bytes, no length prefix
    public_key: Vec<u8>,
    nonce: u64,
    receiver_id: String,
    block_hash: [u8; 32],
    actions: Vec<WireFunctionCall>,
}

impl BorshSerialize for WireTransaction {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        self.signer_id.serialize(writer)?;
        writer.write_all(&self.public_key)?;
        self.nonce.serialize(writer)?;
        self.receiver_id.serialize(writer)?;
        self.block_hash.serialize(writer)?;
        self.actions.serialize(writer)
    }
}

fn wire_action(action: &Action) -> Result<WireFunctionCall, ChainError> {
    let deposit = action.attached_deposit.as_u128().ok_or_else(|| {
        ChainError::Encoding(format!(
            "deposit {} on {} exceeds u128",
            action.attached_deposit, action.method
        ))
    })?;
    let args = serde_json::to_vec(&action.args).map_err(|e| ChainError::Encoding(e.to_string()))?;
    Ok(WireFunctionCall {
        method_name: action.method.clone(),
        args,
        gas: action.attached_gas.as_gas(),
        deposit,
    })
}

/// Borsh bytes of an unsigned transaction
pub fn encode_transaction(tx: &Transaction) -> Result<Vec<u8>, ChainError> {
    let wire = WireTransaction {
        signer_id: tx.signer_id.to_string(),
        public_key: tx.public_key.as_bytes().to_vec(),
        nonce: tx.nonce,
        receiver_id: tx.receiver_id.to_string(),
        block_hash: tx.block_hash,
        actions: tx.actions.iter().map(wire_action).collect::<Result<_, _>>()?,
    };
    borsh::to_vec(&wire).map_err(|e| ChainError::Encoding(e.to_string()))
}

/// Web-wallet signer: redirects to `{wallet_url}/sign` with the batch inline
pub struct WalletRedirect<N> {
    wallet_url: Url,
    navigator: N,
}

impl<N: Navigator> WalletRedirect<N> {
    pub fn new(wallet_url: Url, navigator: N) -> Self {
        Self {
            wallet_url,
            navigator,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// `{wallet_url}/sign?transactions=<b64,...>&callbackUrl=<return_location>`
    pub fn sign_url(&self, transactions: &[Transaction], return_location: &Url) -> Result<Url, ChainError> {
        let encoded = transactions
            .iter()
            .map(|tx| encode_transaction(tx).map(|bytes| STANDARD.encode(bytes)))
            .collect::<Result<Vec<_>, _>>()?
            .join(",");

        let mut url = self.wallet_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChainError::Encoding(format!("wallet url {} cannot take a path", self.wallet_url)))?
            .pop_if_empty()
            .push("sign");
        url.query_pairs_mut()
            .append_pair("transactions", &encoded)
            .append_pair("callbackUrl", return_location.as_str());
        Ok(url)
    }
}

#[async_trait]
impl<N: Navigator> WalletSigner for WalletRedirect<N> {
    async fn request_sign(&self, transactions: Vec<Transaction>, return_location: Url) -> Result<(), ChainError> {
        if transactions.is_empty() {
            return Ok(());
        }
        let url = self.sign_url(&transactions, &return_location)?;
        debug!(count = transactions.len(), wallet = %self.wallet_url, "redirecting to wallet");
        self.navigator.navigate(url)
    }
}
