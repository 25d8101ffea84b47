//! Redemption event handler

use alloy::primitives::{Address, TxHash, U256};
use bigdecimal::BigDecimal;
use gravita_chain::SupportedChain;
use serde::Serialize;

use crate::{
    events::redemption::RedemptionEvent,
    utils::{to_decimal, DEBT_TOKEN_DECIMALS},
};

use super::{asset_info, HandlerContext, HandlerResult};

/// Redemptions carry no ratio; only amounts and asset metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RedemptionRecord {
    pub chain: SupportedChain,
    pub tx_hash: Option<TxHash>,
    pub asset: Address,
    pub symbol: String,
    pub decimals: u8,
    pub price: U256,
    pub attempted_debt_amount: BigDecimal,
    pub actual_debt_amount: BigDecimal,
    pub coll_sent: BigDecimal,
    pub coll_fee: BigDecimal,
}

/// Process a Redemption event
pub async fn handle(
    ctx: &HandlerContext,
    chain: SupportedChain,
    event: &RedemptionEvent,
) -> HandlerResult<RedemptionRecord> {
    let reader = ctx.reader(chain)?;
    let asset = asset_info::resolve(reader, event.asset).await?;

    Ok(RedemptionRecord {
        chain,
        tx_hash: event.tx_hash,
        asset: event.asset,
        attempted_debt_amount: to_decimal(event.attempted_debt_amount, DEBT_TOKEN_DECIMALS),
        actual_debt_amount: to_decimal(event.actual_debt_amount, DEBT_TOKEN_DECIMALS),
        coll_sent: asset.collateral_amount(event.coll_sent),
        coll_fee: asset.collateral_amount(event.coll_fee),
        symbol: asset.symbol,
        decimals: asset.decimals,
        price: asset.price,
    })
}
