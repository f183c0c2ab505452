//! Configuration loading
//!
//! Layers, later wins: built-in network defaults, an optional TOML file,
//! then `LAGOON__`-prefixed environment variables
//! (`LAGOON__CONTRACTS__EXCHANGE=ref-finance-101.testnet`).

use crate::NetworkConfig;
use anyhow::{Context, Result};
use config_crate::{Config, Environment, File};
use std::path::Path;
use tracing::{debug, info};

impl NetworkConfig {
    /// Load configuration for `network_id` with file and environment overrides
    pub fn load(path: Option<&Path>, network_id: &str) -> Result<Self> {
        let defaults = Self::for_network(network_id)?;

        let mut builder = Config::builder().add_source(
            Config::try_from(&defaults).context("Failed to serialize built-in defaults")?,
        );

        if let Some(path) = path {
            info!("Loading network config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        // Values stay strings: amounts exceed i64 and must not pass through f64
        builder = builder.add_source(
            Environment::with_prefix("LAGOON")
                .separator("__")
                .try_parsing(false),
        );

        let config: NetworkConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration for {}", network_id))?;
        debug!(
            network = %config.network_id,
            exchange = %config.contracts.exchange,
            farm = %config.contracts.farm,
            "network config loaded"
        );
        Ok(config)
    }
}
