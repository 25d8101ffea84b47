use std::fmt::Debug;

use alloy::primitives::Address;
use gravita_chain::{ChainError, SupportedChain};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing `{0}` environment variable")]
    MissingEnvVar(String),

    #[error("Invalid `{name}`: `{value}`")]
    InvalidConfig { name: String, value: String },

    #[error("Event decode error: {0}")]
    EventDecode(String),

    #[error("Failed to resolve asset info for {asset}: {source}")]
    AssetResolution {
        asset: Address,
        source: ChainError,
    },

    #[error("Failed to read vessel of {borrower} for asset {asset}: {source}")]
    VesselRead {
        borrower: Address,
        asset: Address,
        source: ChainError,
    },

    #[error("No connection configured for {0}")]
    UnknownChain(SupportedChain),

    #[error("Discord channel `{0}` is not defined")]
    ChannelNotFound(String),

    #[error("Discord API error: {0}")]
    DiscordApi(String),

    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("Connection error on {chain}: {message}")]
    Connection {
        chain: SupportedChain,
        message: String,
    },
}
