//! Client-side chain types

use fsnft_types::{HumanAddr, Uint128};
use serde::{Deserialize, Serialize};

/// A native-token amount
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination, e.g. `ufrt`
    pub denom: String,
    /// Amount in base units, string-encoded on the wire
    pub amount: Uint128,
}

impl Coin {
    /// Convenience constructor
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount: Uint128::from(amount),
        }
    }
}

/// One input or output of a multi-send bank transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendEntry {
    /// Account address
    pub address: HumanAddr,
    /// Coins moved from or to the account
    pub coins: Vec<Coin>,
}

/// One structured log attribute emitted by an included transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Event type, e.g. `message` or `wasm`
    #[serde(rename = "type")]
    pub kind: String,
    /// Attribute key, e.g. `code_id` or `contract_address`
    pub key: String,
    /// Attribute value
    pub value: String,
}

/// Result of a broadcast transaction after inclusion
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResponse {
    /// Status code; zero means success
    pub code: u32,
    /// Transaction hash
    pub txhash: String,
    /// Gas consumed by execution
    pub gas_used: u64,
    /// Raw log string; carries the failure reason when `code` is non-zero
    pub raw_log: String,
    /// Structured log attributes; empty on failure
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl TxResponse {
    /// Whether the transaction executed successfully
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Find the value of the first log attribute with the given key
    pub fn find_attribute(&self, key: &str) -> Option<&str> {
        self.logs
            .iter()
            .find(|l| l.key == key)
            .map(|l| l.value.as_str())
    }

    /// Find the value of the first log attribute with the given event type
    /// and key
    pub fn find_event_attribute(&self, kind: &str, key: &str) -> Option<&str> {
        self.logs
            .iter()
            .find(|l| l.kind == kind && l.key == key)
            .map(|l| l.value.as_str())
    }
}

/// Reference to uploaded contract bytecode
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedCode {
    /// Numeric code id assigned by the chain
    pub code_id: u64,
    /// Content hash of the bytecode
    pub code_hash: String,
}

/// Reference to an instantiated contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Contract address
    pub address: HumanAddr,
    /// Code hash of the contract's bytecode
    pub code_hash: String,
}
