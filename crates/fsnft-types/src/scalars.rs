//! Scalar aliases shared across contract messages

use serde::{Deserialize, Serialize};

/// Human-readable account or contract address
pub type HumanAddr = String;

/// Base64-encoded binary blob
pub type Binary = String;

/// 128-bit unsigned integer, string-encoded on the wire
///
/// Contracts serialize large amounts as JSON strings to avoid precision
/// loss in clients that parse numbers as floats.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Uint128(pub u128);

impl Uint128 {
    /// Zero amount
    pub const ZERO: Uint128 = Uint128(0);

    /// Get the underlying value
    pub fn u128(&self) -> u128 {
        self.0
    }
}

impl From<u128> for Uint128 {
    fn from(v: u128) -> Self {
        Uint128(v)
    }
}

impl std::fmt::Display for Uint128 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Uint128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Uint128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>()
            .map(Uint128)
            .map_err(|e| serde::de::Error::custom(format!("invalid Uint128 '{}': {}", s, e)))
    }
}
