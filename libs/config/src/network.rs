//! Per-network contract table and constants

use anyhow::{bail, Result};
use lagoon_types::{AccountId, Amount};
use serde::{Deserialize, Serialize};
use url::Url;

/// NEAR has 24 decimals; every NEAR-denominated constant below is yocto
pub const NEAR_DECIMALS: u32 = 24;

/// Complete configuration for one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// "mainnet" or "testnet"
    pub network_id: String,
    /// Base URL of the redirect wallet
    pub wallet_url: Url,
    pub contracts: ContractAddresses,
    pub economics: Economics,
    pub gas: GasBudget,
}

/// Contracts the recipes talk to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAddresses {
    /// AMM exchange holding user deposits and pools
    pub exchange: AccountId,
    /// Farm accepting LP shares as seeds
    pub farm: AccountId,
    /// Wrapped NEAR fungible token
    pub wrap_near: AccountId,
    /// Liquid staking pool accepting `deposit_and_stake`
    pub staking_pool: AccountId,
}

/// Storage and deposit constants, all in yoctoNEAR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Economics {
    /// Exchange storage per tracked token
    pub min_deposit_per_token: Amount,
    /// NEP-141 registration cost for a new account
    pub new_account_storage_cost: Amount,
    /// Farm storage per seed
    pub farm_storage_balance: Amount,
    /// Deposit attached to `add_liquidity` to cover LP share storage
    pub lp_storage_deposit: Amount,
}

/// Gas budgets in Tgas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasBudget {
    pub storage_deposit: u64,
    pub ft_transfer_call: u64,
    pub mft_transfer_call: u64,
    /// Plain exchange calls: register_tokens, add/remove_liquidity, withdraw
    pub exchange_call: u64,
    pub farm_call: u64,
    /// near_deposit / near_withdraw
    pub wrap: u64,
    pub stake: u64,
}

impl Default for GasBudget {
    fn default() -> Self {
        Self {
            storage_deposit: 30,
            ft_transfer_call: 180,
            mft_transfer_call: 180,
            exchange_call: 30,
            farm_call: 100,
            wrap: 10,
            stake: 50,
        }
    }
}

fn near(amount: &str) -> Result<Amount> {
    Ok(Amount::parse_units(amount, NEAR_DECIMALS)?)
}

impl Economics {
    fn defaults() -> Result<Self> {
        Ok(Self {
            min_deposit_per_token: near("0.005")?,
            new_account_storage_cost: near("0.00125")?,
            farm_storage_balance: near("0.1")?,
            lp_storage_deposit: near("0.01")?,
        })
    }
}

impl NetworkConfig {
    /// Built-in defaults for a known network
    pub fn for_network(network_id: &str) -> Result<Self> {
        let (wallet_url, contracts) = match network_id {
            "mainnet" => (
                "https://app.mynearwallet.com",
                ContractAddresses {
                    exchange: "v2.ref-finance.near".parse()?,
                    farm: "v2.ref-farming.near".parse()?,
                    wrap_near: "wrap.near".parse()?,
                    staking_pool: "meta-pool.near".parse()?,
                },
            ),
            "testnet" => (
                "https://testnet.mynearwallet.com",
                ContractAddresses {
                    exchange: "ref-finance-101.testnet".parse()?,
                    farm: "v2.ref-farming.testnet".parse()?,
                    wrap_near: "wrap.testnet".parse()?,
                    staking_pool: "meta-v2.pool.testnet".parse()?,
                },
            ),
            other => bail!("Unknown network '{}': expected mainnet or testnet", other),
        };

        Ok(Self {
            network_id: network_id.to_string(),
            wallet_url: Url::parse(wallet_url)?,
            contracts,
            economics: Economics::defaults()?,
            gas: GasBudget::default(),
        })
    }

    /// Reject values that would break storage rounding or starve calls of gas
    pub fn validate(&self) -> Result<()> {
        let economics = &self.economics;
        if economics.min_deposit_per_token.is_zero() {
            bail!("economics.min_deposit_per_token must be greater than zero");
        }
        if economics.new_account_storage_cost.is_zero() {
            bail!("economics.new_account_storage_cost must be greater than zero");
        }
        if economics.farm_storage_balance.is_zero() {
            bail!("economics.farm_storage_balance must be greater than zero");
        }

        let gas = &self.gas;
        for (name, tgas) in [
            ("storage_deposit", gas.storage_deposit),
            ("ft_transfer_call", gas.ft_transfer_call),
            ("mft_transfer_call", gas.mft_transfer_call),
            ("exchange_call", gas.exchange_call),
            ("farm_call", gas.farm_call),
            ("wrap", gas.wrap),
            ("stake", gas.stake),
        ] {
            if tgas == 0 || tgas > 300 {
                bail!("gas.{} must be within 1..=300 Tgas, got {}", name, tgas);
            }
        }

        if !matches!(self.wallet_url.scheme(), "https" | "http") || self.wallet_url.cannot_be_a_base() {
            bail!("wallet_url must be an http(s) base URL, got '{}'", self.wallet_url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mainnet_defaults() {
        let config = NetworkConfig::for_network("mainnet").unwrap();
        assert_eq!(config.contracts.exchange.as_str(), "v2.ref-finance.near");
        assert_eq!(config.contracts.wrap_near.as_str(), "wrap.near");
        assert_eq!(
            config.economics.min_deposit_per_token.to_string(),
            "5000000000000000000000"
        );
        assert_eq!(
            config.economics.new_account_storage_cost.to_string(),
            "1250000000000000000000"
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_network() {
        assert!(NetworkConfig::for_network("betanet").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_per_item_minimum() {
        let mut config = NetworkConfig::for_network("testnet").unwrap();
        config.economics.min_deposit_per_token = Amount::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_gas_over_block_limit() {
        let mut config = NetworkConfig::for_network("testnet").unwrap();
        config.gas.ft_transfer_call = 301;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_wallet() {
        let mut config = NetworkConfig::for_network("mainnet").unwrap();
        config.wallet_url = Url::parse("mailto:wallet@example.com").unwrap();
        assert!(config.validate().is_err());

        config.wallet_url = Url::parse("ftp://wallet.example.com").unwrap();
        assert!(config.validate().is_err());
    }
}
