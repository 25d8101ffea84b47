use std::fmt::Debug;
use thiserror::Error;

use crate::chain::SupportedChain;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Missing `{0}` environment variable")]
    MissingEnvVar(String),

    #[error("Invalid chain: `{0}`")]
    InvalidChain(String),

    #[error("Invalid address in `{name}`: `{value}`")]
    InvalidAddress { name: String, value: String },

    #[error("RPC transport error on {chain}: {message}")]
    Transport {
        chain: SupportedChain,
        message: String,
    },

    #[error("Contract call `{method}` failed: {message}")]
    Call {
        method: &'static str,
        message: String,
    },
}
