//! Supported networks and their per-chain configuration.

use std::{env, fmt, str::FromStr};

use alloy::primitives::{Address, TxHash};
use serde::Serialize;

use crate::error::ChainError;

/// Networks the Gravita protocol is deployed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SupportedChain {
    Ethereum,
    Arbitrum,
}

impl SupportedChain {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedChain::Ethereum => "ETHEREUM",
            SupportedChain::Arbitrum => "ARBITRUM",
        }
    }

    /// Base URL of the chain's block explorer
    pub fn explorer_url(&self) -> &'static str {
        match self {
            SupportedChain::Ethereum => "https://etherscan.io",
            SupportedChain::Arbitrum => "https://arbiscan.io",
        }
    }

    /// Explorer link for a transaction
    pub fn tx_url(&self, tx_hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url(), tx_hash)
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedChain {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ETHEREUM" => Ok(SupportedChain::Ethereum),
            "ARBITRUM" => Ok(SupportedChain::Arbitrum),
            _ => Err(ChainError::InvalidChain(s.to_string())),
        }
    }
}

/// Gravita contract deployment on one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractAddresses {
    /// Emits `VesselCreated`
    pub borrower_operations: Address,
    /// Holds the `Vessels(borrower, asset)` ledger
    pub vessel_manager: Address,
    /// Emits `Liquidation` and `Redemption`
    pub vessel_manager_operations: Address,
    pub price_feed: Address,
}

/// Connection settings for one chain
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain: SupportedChain,
    pub rpc_url: String,
    pub contracts: ContractAddresses,
}

impl ChainConfig {
    /// Build the config from `<CHAIN>_RPC_URL`, `<CHAIN>_BORROWER_OPERATIONS`,
    /// `<CHAIN>_VESSEL_MANAGER`, `<CHAIN>_VESSEL_MANAGER_OPERATIONS` and
    /// `<CHAIN>_PRICE_FEED`.
    pub fn from_env(chain: SupportedChain) -> Result<Self, ChainError> {
        Self::from_lookup(chain, |name| env::var(name).ok())
    }

    fn from_lookup<F>(chain: SupportedChain, lookup: F) -> Result<Self, ChainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read_var = |suffix: &str| {
            let name = var_name(chain, suffix);
            lookup(&name).ok_or(ChainError::MissingEnvVar(name))
        };
        let read_address = |suffix: &str| {
            let value = read_var(suffix)?;
            parse_address(&var_name(chain, suffix), &value)
        };

        Ok(Self {
            chain,
            rpc_url: read_var("RPC_URL")?,
            contracts: ContractAddresses {
                borrower_operations: read_address("BORROWER_OPERATIONS")?,
                vessel_manager: read_address("VESSEL_MANAGER")?,
                vessel_manager_operations: read_address("VESSEL_MANAGER_OPERATIONS")?,
                price_feed: read_address("PRICE_FEED")?,
            },
        })
    }
}

fn var_name(chain: SupportedChain, suffix: &str) -> String {
    format!("{}_{}", chain.as_str(), suffix)
}

fn parse_address(name: &str, value: &str) -> Result<Address, ChainError> {
    Address::from_str(value.trim()).map_err(|_| ChainError::InvalidAddress {
        name: name.to_string(),
        value: value.to_string(),
    })
}
