//! # Lagoon Recipes
//!
//! User-facing DeFi steps against a NEAR exchange, its farm, wrapped NEAR
//! and a liquid staking pool. Each step reads fresh chain state, computes
//! exact amounts and returns the ordered unsigned transactions the user's
//! wallet must sign.
//!
//! ## Architecture Role
//!
//! ```text
//! Session ──→ step (reads via Queries, math via lagoon-amm)
//!                 │
//!                 ↓
//!          Plan of Stages ──→ TransactionBuilder ──→ Vec<Transaction>
//!                                                        │
//!                                  lagoon_chain::hand_off ←┘──→ WalletSigner
//! ```
//!
//! ## Partial Application
//!
//! A step touching several contracts yields several transactions. The
//! wallet submits them together but the chain runs them independently, so
//! any prefix of a batch may land without the rest. Nothing is rolled back.
//!
//! ## Example
//!
//! ```rust,no_run
//! # async fn run(session: lagoon_recipes::Session) -> Result<(), lagoon_recipes::RecipeError> {
//! use lagoon_recipes::steps::recipes::deposit_add_liquidity_and_stake;
//! use lagoon_types::Amount;
//!
//! let amounts = [Amount::from(10u64), Amount::from(20u64)];
//! let batch = deposit_add_liquidity_and_stake(&session, 79, &amounts, true).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod plan;
pub mod session;
pub mod steps;

pub use error::{RecipeError, Result};
pub use plan::{Plan, Stage};
pub use session::Session;
pub use steps::exchange::{deposit_tokens, withdraw_token, wrap_and_deposit};
pub use steps::farm::{farm_seed_id, stake_lp, unstake_lp};
pub use steps::liquidity::{add_liquidity, remove_liquidity};
pub use steps::recipes::deposit_add_liquidity_and_stake;
pub use steps::swap::swap;
pub use steps::wrap::{stake_near, unwrap_near, wrap_near};
