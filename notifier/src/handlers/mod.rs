//! Enrichment handlers for the Gravita notifier
//!
//! Handlers take a decoded event, read the supporting on-chain state (asset
//! metadata, price, vessel) and compute the display metrics.

pub mod asset_info;
pub mod liquidation;
pub mod redemption;
pub mod vessel_created;

use std::{collections::HashMap, sync::Arc};

use gravita_chain::{ChainReader, SupportedChain};
use serde::Serialize;

use crate::{discord::Notifier, error::AppError, events::DecodedEvent};

/// Context shared by every in-flight event: one reader per chain and the
/// notification sink.
pub struct HandlerContext {
    chains: HashMap<SupportedChain, Arc<dyn ChainReader>>,
    pub notifier: Arc<dyn Notifier>,
}

impl HandlerContext {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            chains: HashMap::new(),
            notifier,
        }
    }

    /// Register the reader for the chain it is bound to
    pub fn with_chain(mut self, reader: Arc<dyn ChainReader>) -> Self {
        self.chains.insert(reader.chain(), reader);
        self
    }

    pub fn reader(&self, chain: SupportedChain) -> HandlerResult<&dyn ChainReader> {
        self.chains
            .get(&chain)
            .map(|reader| reader.as_ref())
            .ok_or(AppError::UnknownChain(chain))
    }
}

/// Result type for handlers
pub type HandlerResult<T> = Result<T, AppError>;

/// Output of the enrichment pipeline, one shape per event kind
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnrichedRecord {
    VesselCreated(vessel_created::VesselCreatedRecord),
    Liquidation(liquidation::LiquidationRecord),
    Redemption(redemption::RedemptionRecord),
}

/// Run the handler matching the decoded event
pub async fn enrich(
    ctx: &HandlerContext,
    chain: SupportedChain,
    event: &DecodedEvent,
) -> HandlerResult<EnrichedRecord> {
    match event {
        DecodedEvent::VesselCreated(event) => vessel_created::handle(ctx, chain, event)
            .await
            .map(EnrichedRecord::VesselCreated),
        DecodedEvent::Liquidation(event) => liquidation::handle(ctx, chain, event)
            .await
            .map(EnrichedRecord::Liquidation),
        DecodedEvent::Redemption(event) => redemption::handle(ctx, chain, event)
            .await
            .map(EnrichedRecord::Redemption),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    };

    use alloy::primitives::{Address, U256};
    use async_trait::async_trait;
    use gravita_chain::{ChainError, ChainReader, SupportedChain, VesselRecord};

    use super::HandlerContext;
    use crate::{
        discord::{embeds::Embed, Notifier},
        error::AppError,
    };

    /// In-memory chain with configurable assets and vessels
    #[derive(Default)]
    pub struct MockReader {
        pub assets: HashMap<Address, (String, u8, U256)>,
        pub vessels: HashMap<(Address, Address), VesselRecord>,
        /// Assets whose price read reverts
        pub broken_prices: HashSet<Address>,
    }

    impl MockReader {
        pub fn with_asset(mut self, asset: Address, symbol: &str, decimals: u8, price: U256) -> Self {
            self.assets.insert(asset, (symbol.to_string(), decimals, price));
            self
        }

        pub fn with_vessel(mut self, borrower: Address, asset: Address, vessel: VesselRecord) -> Self {
            self.vessels.insert((borrower, asset), vessel);
            self
        }

        pub fn with_broken_price(mut self, asset: Address) -> Self {
            self.broken_prices.insert(asset);
            self
        }

        fn asset(&self, asset: Address, method: &'static str) -> Result<&(String, u8, U256), ChainError> {
            self.assets.get(&asset).ok_or(ChainError::Call {
                method,
                message: "execution reverted".to_string(),
            })
        }
    }

    #[async_trait]
    impl ChainReader for MockReader {
        fn chain(&self) -> SupportedChain {
            SupportedChain::Ethereum
        }

        async fn symbol(&self, asset: Address) -> Result<String, ChainError> {
            Ok(self.asset(asset, "symbol")?.0.clone())
        }

        async fn decimals(&self, asset: Address) -> Result<u8, ChainError> {
            Ok(self.asset(asset, "decimals")?.1)
        }

        async fn fetch_price(&self, asset: Address) -> Result<U256, ChainError> {
            if self.broken_prices.contains(&asset) {
                return Err(ChainError::Call {
                    method: "fetchPrice",
                    message: "execution reverted".to_string(),
                });
            }
            Ok(self.asset(asset, "fetchPrice")?.2)
        }

        async fn vessel(&self, borrower: Address, asset: Address) -> Result<VesselRecord, ChainError> {
            Ok(self.vessels.get(&(borrower, asset)).copied().unwrap_or_default())
        }
    }

    /// Notifier that keeps every embed it is asked to send
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<Embed>>,
    }

    impl RecordingNotifier {
        pub fn sent(&self) -> Vec<Embed> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, embed: &Embed) -> Result<(), AppError> {
            self.sent.lock().unwrap().push(embed.clone());
            Ok(())
        }
    }

    pub fn context(reader: MockReader) -> (HandlerContext, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = HandlerContext::new(notifier.clone()).with_chain(Arc::new(reader));
        (ctx, notifier)
    }

    /// `value * 10^decimals`
    pub fn units(value: u64, decimals: u8) -> U256 {
        U256::from(value) * U256::from(10u64).pow(U256::from(decimals))
    }
}
