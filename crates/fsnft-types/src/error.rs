//! Structured contract error envelope
//!
//! Contracts report query failures as a JSON object whose single top-level
//! key names the error kind. The query channel distinguishes success and
//! failure payloads structurally: a response is an error if and only if it
//! decodes as one of these envelopes, never because some nested string
//! happens to contain an error-looking substring.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error envelope returned by a contract in place of a query response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ContractError {
    /// The contract could not deserialize the message
    #[error("parse error{}: {msg}", target.as_deref().map(|t| format!(" ({t})")).unwrap_or_default())]
    ParseErr {
        /// Type the contract was deserializing into
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<String>,
        /// Failure description
        msg: String,
    },
    /// Any other contract-level failure
    #[error("contract error: {msg}")]
    GenericErr {
        /// Failure description
        msg: String,
    },
    /// Query-specific failure
    #[error("query error: {msg}")]
    QueryError {
        /// Failure description
        msg: String,
    },
}

impl ContractError {
    /// Detect an error envelope in a decoded query response.
    ///
    /// Returns `Some` only when the top-level value is a JSON object with a
    /// single key naming one of the error variants. Payloads that merely
    /// contain error-looking text inside user data are not errors.
    pub fn from_query_response(value: &Value) -> Option<ContractError> {
        let map = value.as_object()?;
        if map.len() != 1 {
            return None;
        }
        let key = map.keys().next()?;
        if !matches!(key.as_str(), "parse_err" | "generic_err" | "query_error") {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}
