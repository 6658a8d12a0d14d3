//! Client error types

use fsnft_types::ContractError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport/network error
    #[error("transport error: {0}")]
    Transport(String),

    /// Error response from the gateway
    #[error("gateway error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Contract-level query failure (structured error envelope)
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Invalid mnemonic phrase
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Key derivation failure
    #[error("key error: {0}")]
    Key(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Transaction was broadcast but never included before the deadline
    #[error("timed out waiting for inclusion of tx {txhash}")]
    Timeout {
        /// Hash of the pending transaction
        txhash: String,
    },
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}
