//! VesselCreated event handler
//!
//! Reads the new vessel from the VesselManager and values it:
//! - debt is 18 decimal fixed point
//! - collateral and stake use the asset's decimals
//! - LTV = debt / (collateral * price) * 100

use alloy::primitives::{Address, TxHash, U256};
use bigdecimal::BigDecimal;
use gravita_chain::SupportedChain;
use serde::Serialize;

use crate::{
    error::AppError,
    events::vessel_created::VesselCreatedEvent,
    utils::{ltv_percentage, to_decimal, Ltv, DEBT_TOKEN_DECIMALS},
};

use super::{asset_info, HandlerContext, HandlerResult};

#[derive(Debug, Clone, Serialize)]
pub struct VesselCreatedRecord {
    pub chain: SupportedChain,
    pub tx_hash: Option<TxHash>,
    pub asset: Address,
    pub borrower: Address,
    pub symbol: String,
    pub decimals: u8,
    pub price: U256,
    pub debt_raw: U256,
    pub collateral_raw: U256,
    pub stake_raw: U256,
    pub debt: BigDecimal,
    pub collateral: BigDecimal,
    pub stake: BigDecimal,
    pub collateral_value: BigDecimal,
    pub ltv: Ltv,
}

/// Process a VesselCreated event
///
/// 1. Read `Vessels(borrower, asset)`
/// 2. Resolve the asset's symbol, decimals and price
/// 3. Compute collateral value and LTV
pub async fn handle(
    ctx: &HandlerContext,
    chain: SupportedChain,
    event: &VesselCreatedEvent,
) -> HandlerResult<VesselCreatedRecord> {
    let reader = ctx.reader(chain)?;

    let vessel = reader
        .vessel(event.borrower, event.asset)
        .await
        .map_err(|source| AppError::VesselRead {
            borrower: event.borrower,
            asset: event.asset,
            source,
        })?;

    let asset = asset_info::resolve(reader, event.asset).await?;

    let debt = to_decimal(vessel.debt, DEBT_TOKEN_DECIMALS);
    let collateral = asset.collateral_amount(vessel.coll);
    let stake = asset.collateral_amount(vessel.stake);
    let collateral_value = &collateral * &asset.price_decimal();
    let ltv = ltv_percentage(&debt, &collateral_value);

    Ok(VesselCreatedRecord {
        chain,
        tx_hash: event.tx_hash,
        asset: event.asset,
        borrower: event.borrower,
        symbol: asset.symbol,
        decimals: asset.decimals,
        price: asset.price,
        debt_raw: vessel.debt,
        collateral_raw: vessel.coll,
        stake_raw: vessel.stake,
        debt,
        collateral,
        stake,
        collateral_value,
        ltv,
    })
}
