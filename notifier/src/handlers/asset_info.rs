//! Collateral asset metadata and price
//!
//! Nothing is cached: every event issues fresh `symbol()`, `decimals()` and
//! `fetchPrice()` reads, even when the same asset was resolved a moment ago.
//! The values are therefore as fresh as the block the RPC node serves, at the
//! cost of three extra calls per event.

use alloy::primitives::{Address, U256};
use bigdecimal::BigDecimal;
use gravita_chain::ChainReader;
use serde::Serialize;

use crate::{error::AppError, utils::to_decimal};

use super::HandlerResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetInfo {
    pub symbol: String,
    pub decimals: u8,
    /// Raw price feed answer
    pub price: U256,
}

impl AssetInfo {
    /// Collateral-side amount in the asset's decimals
    pub fn collateral_amount(&self, raw: U256) -> BigDecimal {
        to_decimal(raw, self.decimals)
    }

    /// Price feed answer scaled by the asset's decimals
    pub fn price_decimal(&self) -> BigDecimal {
        to_decimal(self.price, self.decimals)
    }
}

/// Resolve symbol, decimals and price for `asset`.
///
/// The three reads run concurrently; the first failure aborts the whole
/// resolution.
pub async fn resolve(reader: &dyn ChainReader, asset: Address) -> HandlerResult<AssetInfo> {
    let (symbol, decimals, price) = tokio::try_join!(
        reader.symbol(asset),
        reader.decimals(asset),
        reader.fetch_price(asset),
    )
    .map_err(|source| AppError::AssetResolution { asset, source })?;

    Ok(AssetInfo {
        symbol,
        decimals,
        price,
    })
}
