//! Liquidation event decoder
//!
//! Event signature: Liquidation(address indexed asset, uint256 liquidatedDebt, uint256 liquidatedColl,
//! uint256 collGasCompensation, uint256 debtTokenGasCompensation)

use alloy::{
    primitives::{Address, TxHash, U256},
    rpc::types::Log,
    sol_types::SolEvent,
};
use gravita_chain::contracts::IVesselManagerOperations::Liquidation;
use serde::Serialize;

use crate::error::AppError;

/// Decoded Liquidation event payload
///
/// Debt-side amounts are 18 decimal fixed point, collateral-side amounts use
/// the asset's decimals.
#[derive(Debug, Clone, Serialize)]
pub struct LiquidationEvent {
    pub asset: Address,
    pub liquidated_debt: U256,
    pub debt_token_gas_compensation: U256,
    pub liquidated_coll: U256,
    pub coll_gas_compensation: U256,
    pub tx_hash: Option<TxHash>,
}

/// Decode a Liquidation event through its ABI description
pub fn decode(log: &Log) -> Result<LiquidationEvent, AppError> {
    let event = Liquidation::decode_log_data(log.data(), true)
        .map_err(|e| AppError::EventDecode(format!("Liquidation: {e}")))?;

    Ok(LiquidationEvent {
        asset: event.asset,
        liquidated_debt: event.liquidatedDebt,
        debt_token_gas_compensation: event.debtTokenGasCompensation,
        liquidated_coll: event.liquidatedColl,
        coll_gas_compensation: event.collGasCompensation,
        tx_hash: log.transaction_hash,
    })
}
