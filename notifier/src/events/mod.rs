//! Event decoders for the Gravita notifier
//!
//! This module contains decoders for the three watched events:
//! - VesselCreated: a borrower opened a position (BorrowerOperations)
//! - Liquidation: positions of one asset were liquidated (VesselManagerOperations)
//! - Redemption: debt tokens were redeemed against collateral (VesselManagerOperations)

pub mod liquidation;
pub mod redemption;
pub mod vessel_created;

use std::fmt;

use alloy::{
    primitives::{Address, B256},
    rpc::types::{Filter, Log},
    sol_types::SolEvent,
};
use gravita_chain::{
    contracts::{IBorrowerOperations, IVesselManagerOperations},
    ContractAddresses,
};

use crate::error::AppError;

/// The closed set of events the notifier subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    VesselCreated,
    Liquidation,
    Redemption,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::VesselCreated,
        EventKind::Liquidation,
        EventKind::Redemption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::VesselCreated => "VESSEL_CREATED",
            EventKind::Liquidation => "LIQUIDATION",
            EventKind::Redemption => "REDEMPTION",
        }
    }

    /// Topic0 of the event
    pub fn signature_hash(&self) -> B256 {
        match self {
            EventKind::VesselCreated => IBorrowerOperations::VesselCreated::SIGNATURE_HASH,
            EventKind::Liquidation => IVesselManagerOperations::Liquidation::SIGNATURE_HASH,
            EventKind::Redemption => IVesselManagerOperations::Redemption::SIGNATURE_HASH,
        }
    }

    /// Contract that emits the event
    pub fn emitter(&self, contracts: &ContractAddresses) -> Address {
        match self {
            EventKind::VesselCreated => contracts.borrower_operations,
            EventKind::Liquidation | EventKind::Redemption => contracts.vessel_manager_operations,
        }
    }

    /// Subscription filter for this event on one chain
    pub fn filter(&self, contracts: &ContractAddresses) -> Filter {
        Filter::new()
            .address(self.emitter(contracts))
            .event_signature(self.signature_hash())
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A log decoded with the schema of its event kind
#[derive(Debug, Clone)]
pub enum DecodedEvent {
    VesselCreated(vessel_created::VesselCreatedEvent),
    Liquidation(liquidation::LiquidationEvent),
    Redemption(redemption::RedemptionEvent),
}

impl DecodedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DecodedEvent::VesselCreated(_) => EventKind::VesselCreated,
            DecodedEvent::Liquidation(_) => EventKind::Liquidation,
            DecodedEvent::Redemption(_) => EventKind::Redemption,
        }
    }
}

/// Decode a log with the schema of `kind`.
///
/// The kind comes from the subscription the log arrived on; the log's own
/// topic0 is only checked, never used to pick a decoder.
pub fn decode_event(kind: EventKind, log: &Log) -> Result<DecodedEvent, AppError> {
    match kind {
        EventKind::VesselCreated => vessel_created::decode(log).map(DecodedEvent::VesselCreated),
        EventKind::Liquidation => liquidation::decode(log).map(DecodedEvent::Liquidation),
        EventKind::Redemption => redemption::decode(log).map(DecodedEvent::Redemption),
    }
}
