//! # Lagoon Chain Layer
//!
//! ## Purpose
//!
//! Everything between pure amount math and the user's wallet: typed
//! read-only queries, the storage deposit policy, per-key nonce sequencing,
//! unsigned transaction assembly and the redirect hand-off to the signer.
//!
//! ## Integration Points
//!
//! - **Input**: a [`ChainView`] implementation supplied by the transport
//! - **Output**: ordered [`lagoon_types::Transaction`] batches given to a [`WalletSigner`]
//!
//! ## Architecture Role
//!
//! ```text
//! ChainView ──→ [Queries] ──→ pools, storage balances, quotes
//!     │                              │
//!     └──→ [TransactionBuilder] ←── TransactionPlan (receiver + actions)
//!                 │   uses [NonceSequencer]
//!                 ↓
//!          [hand_off] ──→ WalletSigner ──→ redirect
//! ```
//!
//! Nothing here signs or submits. Every read is fresh; no chain state is cached.

pub mod builder;
pub mod error;
pub mod nonce;
pub mod queries;
pub mod storage;
pub mod testing;
pub mod view;
pub mod wallet;

pub use builder::{TransactionBuilder, TransactionPlan};
pub use error::ChainError;
pub use nonce::NonceSequencer;
pub use queries::Queries;
pub use storage::{storage_deposit_action, StorageRequirement};
pub use view::ChainView;
pub use wallet::{encode_transaction, hand_off, sequence_nonces, Navigator, WalletRedirect, WalletSigner};
