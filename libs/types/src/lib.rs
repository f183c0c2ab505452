//! # Lagoon Types
//!
//! Shared vocabulary for the Lagoon crates: exact token [`Amount`]s, exchange
//! [`Pool`] snapshots, NEP-145 [`AccountStorageBalance`]s and the unsigned
//! [`Transaction`]s handed to an external wallet.
//!
//! ## Design Principles
//!
//! - **No Precision Loss**: amounts are 256-bit unsigned integers in the
//!   token's smallest unit, carried as decimal strings on the wire
//! - **Transient State**: pools, balances and access keys are plain snapshots;
//!   nothing here caches chain state
//! - **One Receiver Per Transaction**: a [`Transaction`] only ever targets one
//!   contract, its actions run in order
//!
//! ## Quick Start
//!
//! ```rust
//! use lagoon_types::Amount;
//!
//! let deposit = Amount::parse_units("0.005", 24).unwrap();
//! assert_eq!(deposit.to_string(), "5000000000000000000000");
//! assert_eq!(Amount::from(39u64).round_up_to_nearest(Amount::from(5u64)).unwrap(), Amount::from(40u64));
//! ```

pub mod common;
pub mod pool;
pub mod transaction;

pub use common::amount::Amount;
pub use common::errors::AmountError;
pub use pool::{share_token_id, AccountStorageBalance, Pool, PoolId};
pub use transaction::{AccessKey, Action, SwapAction, Transaction, ONE_YOCTO};

/// Chain primitives re-exported so downstream crates agree on one definition
pub use near_sdk::{AccountId, CryptoHash, Gas, PublicKey};
