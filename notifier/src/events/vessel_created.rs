//! VesselCreated event decoder
//!
//! Event signature: VesselCreated(address indexed asset, address indexed borrower, uint256 arrayIndex)

use alloy::{
    primitives::{Address, TxHash},
    rpc::types::Log,
    sol_types::SolEvent,
};
use gravita_chain::contracts::IBorrowerOperations::VesselCreated;
use serde::Serialize;

use crate::error::AppError;

/// Decoded VesselCreated event payload
#[derive(Debug, Clone, Serialize)]
pub struct VesselCreatedEvent {
    /// Collateral asset of the new vessel
    pub asset: Address,
    /// Owner of the new vessel
    pub borrower: Address,
    pub tx_hash: Option<TxHash>,
}

/// Decode a VesselCreated event from raw log topics
///
/// Topics layout:
/// - topics[0]: event signature
/// - topics[1]: asset (indexed, 32 bytes, address in last 20 bytes)
/// - topics[2]: borrower (indexed, 32 bytes, address in last 20 bytes)
///
/// The data section (arrayIndex) is not needed.
pub fn decode(log: &Log) -> Result<VesselCreatedEvent, AppError> {
    let topics = log.topics();

    // Ensure we have enough topics
    if topics.len() < 3 {
        return Err(AppError::EventDecode(format!(
            "VesselCreated: expected 3 topics, got {}",
            topics.len()
        )));
    }

    if topics[0] != VesselCreated::SIGNATURE_HASH {
        return Err(AppError::EventDecode(format!(
            "VesselCreated: unexpected topic0 {}",
            topics[0]
        )));
    }

    Ok(VesselCreatedEvent {
        asset: Address::from_word(topics[1]),
        borrower: Address::from_word(topics[2]),
        tx_hash: log.transaction_hash,
    })
}
