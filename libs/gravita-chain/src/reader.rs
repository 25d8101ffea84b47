//! Read-only access to a chain's Gravita contracts.

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    pubsub::SubscriptionStream,
    rpc::types::{Filter, Log},
};
use async_trait::async_trait;

use crate::{
    chain::{ChainConfig, ContractAddresses, SupportedChain},
    contracts::{IPriceFeed, IVesselManager, IERC20},
    error::ChainError,
};

/// Position of one borrower against one collateral asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VesselRecord {
    /// Debt in 18 decimal fixed point
    pub debt: U256,
    /// Collateral in the asset's own decimals
    pub coll: U256,
    pub stake: U256,
}

/// Contract reads used by the enrichment pipeline.
///
/// Implementations are shared between concurrently running event tasks and
/// must not hold mutable state.
#[async_trait]
pub trait ChainReader: Send + Sync {
    fn chain(&self) -> SupportedChain;

    /// ERC-20 `symbol()`
    async fn symbol(&self, asset: Address) -> Result<String, ChainError>;

    /// ERC-20 `decimals()`
    async fn decimals(&self, asset: Address) -> Result<u8, ChainError>;

    /// `PriceFeed.fetchPrice(asset)` on this chain's price feed
    async fn fetch_price(&self, asset: Address) -> Result<U256, ChainError>;

    /// `VesselManager.Vessels(borrower, asset)`
    async fn vessel(&self, borrower: Address, asset: Address) -> Result<VesselRecord, ChainError>;
}

/// A live provider bound to one chain's Gravita deployment
pub struct ChainConnection<P> {
    config: ChainConfig,
    provider: P,
}

impl<P> ChainConnection<P>
where
    P: Provider + Clone,
{
    pub fn new(config: ChainConfig, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn contracts(&self) -> &ContractAddresses {
        &self.config.contracts
    }

    /// Open an `eth_subscribe` log subscription for `filter`
    pub async fn subscribe_logs(&self, filter: &Filter) -> Result<SubscriptionStream<Log>, ChainError> {
        let subscription =
            self.provider
                .subscribe_logs(filter)
                .await
                .map_err(|e| ChainError::Transport {
                    chain: self.config.chain,
                    message: e.to_string(),
                })?;

        Ok(subscription.into_stream())
    }
}

fn call_error(method: &'static str, error: alloy::contract::Error) -> ChainError {
    ChainError::Call {
        method,
        message: error.to_string(),
    }
}

#[async_trait]
impl<P> ChainReader for ChainConnection<P>
where
    P: Provider + Clone + 'static,
{
    fn chain(&self) -> SupportedChain {
        self.config.chain
    }

    async fn symbol(&self, asset: Address) -> Result<String, ChainError> {
        let token = IERC20::new(asset, self.provider.clone());
        let result = token
            .symbol()
            .call()
            .await
            .map_err(|e| call_error("symbol", e))?;

        Ok(result._0)
    }

    async fn decimals(&self, asset: Address) -> Result<u8, ChainError> {
        let token = IERC20::new(asset, self.provider.clone());
        let result = token
            .decimals()
            .call()
            .await
            .map_err(|e| call_error("decimals", e))?;

        Ok(result._0)
    }

    async fn fetch_price(&self, asset: Address) -> Result<U256, ChainError> {
        let price_feed = IPriceFeed::new(self.config.contracts.price_feed, self.provider.clone());
        let result = price_feed
            .fetchPrice(asset)
            .call()
            .await
            .map_err(|e| call_error("fetchPrice", e))?;

        Ok(result._0)
    }

    async fn vessel(&self, borrower: Address, asset: Address) -> Result<VesselRecord, ChainError> {
        let vessel_manager =
            IVesselManager::new(self.config.contracts.vessel_manager, self.provider.clone());
        let result = vessel_manager
            .Vessels(borrower, asset)
            .call()
            .await
            .map_err(|e| call_error("Vessels", e))?;

        Ok(VesselRecord {
            debt: result.debt,
            coll: result.coll,
            stake: result.stake,
        })
    }
}
