//! Redemption event decoder
//!
//! Event signature: Redemption(address indexed asset, uint256 attemptedDebtAmount, uint256 actualDebtAmount,
//! uint256 collSent, uint256 collFee)

use alloy::{
    primitives::{Address, TxHash, U256},
    rpc::types::Log,
    sol_types::SolEvent,
};
use gravita_chain::contracts::IVesselManagerOperations::Redemption;
use serde::Serialize;

use crate::error::AppError;

/// Decoded Redemption event payload
#[derive(Debug, Clone, Serialize)]
pub struct RedemptionEvent {
    pub asset: Address,
    pub attempted_debt_amount: U256,
    pub actual_debt_amount: U256,
    pub coll_sent: U256,
    pub coll_fee: U256,
    pub tx_hash: Option<TxHash>,
}

/// Decode a Redemption event through its ABI description
pub fn decode(log: &Log) -> Result<RedemptionEvent, AppError> {
    let event = Redemption::decode_log_data(log.data(), true)
        .map_err(|e| AppError::EventDecode(format!("Redemption: {e}")))?;

    Ok(RedemptionEvent {
        asset: event.asset,
        attempted_debt_amount: event.attemptedDebtAmount,
        actual_debt_amount: event.actualDebtAmount,
        coll_sent: event.collSent,
        coll_fee: event.collFee,
        tx_hash: log.transaction_hash,
    })
}
