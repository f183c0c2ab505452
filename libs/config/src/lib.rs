//! # Lagoon Configuration
//!
//! Contract addresses and economic constants for each supported network.
//!
//! ## Features
//!
//! - **Contract Table**: exchange, farm, wrapped NEAR and staking pool accounts
//! - **Economics**: storage minimums and LP storage deposits, in yoctoNEAR
//! - **Gas Budgets**: fixed Tgas per call kind
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lagoon_config::NetworkConfig;
//!
//! // Built-in defaults, then config/lagoon.toml, then LAGOON__* variables
//! let config = NetworkConfig::load(Some("config/lagoon.toml".as_ref()), "mainnet").unwrap();
//! let exchange = &config.contracts.exchange;
//! ```

pub mod loader;
pub mod network;

pub use network::{ContractAddresses, Economics, GasBudget, NetworkConfig};
