//! # Lagoon AMM Library - Exact Pool Share Mathematics
//!
//! ## Purpose
//!
//! Integer-only math for constant-pool liquidity positions: how many LP
//! shares a deposit earns, how many tokens a withdrawal must at least return,
//! and the minimum output a swap will accept. Swap quotes are not simulated
//! locally; [`quote::pool_output_for_input`] trusts the exchange contract.
//!
//! ## Precision
//!
//! Every result is a floor of an exact 512-bit intermediate. Two fixed
//! haircuts are part of the contract with the exchange:
//!
//! - [`Haircut::SLIPPAGE`]: 99.9%, applied to swap outputs and withdrawals
//! - [`Haircut::LP_SHARES`]: 99.7%, applied to estimated LP shares
//!
//! ## Architecture Role
//!
//! ```text
//! Pool snapshot ──→ [PoolMath] ──→ share estimate / min amounts ──→ recipe steps
//! get_return    ──→ [quote]    ──→ [Haircut::SLIPPAGE]        ──→ swap min_amount_out
//! ```

pub mod error;
pub mod pool_math;
pub mod pool_traits;
pub mod quote;
pub mod slippage;

pub use error::PoolMathError;
pub use pool_math::PoolMath;
pub use pool_traits::LiquidityPool;
pub use quote::{pool_output_for_input, PoolQuoter};
pub use slippage::{minimum_output, Haircut};

pub use lagoon_types::Amount;
