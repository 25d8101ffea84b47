use std::env;

use alloy::providers::{Provider, ProviderBuilder};

pub mod chain;
pub mod contracts;
pub mod error;
pub mod reader;

// Re-export commonly used types
pub use chain::{ChainConfig, ContractAddresses, SupportedChain};
pub use error::ChainError;
pub use reader::{ChainConnection, ChainReader, VesselRecord};

mod defaults {
    pub const SUPPORTED_CHAINS: &str = "ETHEREUM,ARBITRUM";
}

/// Parse a comma separated chain list such as `ETHEREUM,ARBITRUM`.
pub fn parse_chain_list(list: &str) -> Result<Vec<SupportedChain>, ChainError> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

/// Open one provider per configured chain.
///
/// Reads `SUPPORTED_CHAINS` and the per-chain `<CHAIN>_*` variables. The RPC
/// endpoint must be a websocket (or IPC) URL since the notifier relies on
/// `eth_subscribe`.
pub async fn initialize_chains(
) -> Result<Vec<ChainConnection<impl Provider + Clone + 'static>>, ChainError> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let chains = parse_chain_list(
        &env::var("SUPPORTED_CHAINS").unwrap_or(String::from(defaults::SUPPORTED_CHAINS)),
    )?;

    let mut connections = Vec::with_capacity(chains.len());

    for chain in chains {
        let config = ChainConfig::from_env(chain)?;

        let provider = ProviderBuilder::new()
            .on_builtin(&config.rpc_url)
            .await
            .map_err(|e| ChainError::Transport {
                chain,
                message: e.to_string(),
            })?;

        tracing::info!(chain = %chain, "Connected to chain");
        connections.push(ChainConnection::new(config, provider));
    }

    Ok(connections)
}
