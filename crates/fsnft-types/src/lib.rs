//! # fsnft-types
//!
//! Wire-message types for the fractionalizer and ftoken contracts.
//!
//! Everything in this crate is a plain data contract: the receiving
//! contracts deserialize these messages strictly, so field names and tag
//! casing are part of the wire format. Execute and query messages are
//! externally tagged enums serialized in `snake_case`, the convention the
//! contract runtime expects.
//!
//! This crate provides:
//! - Scalar aliases shared by every message ([`HumanAddr`], [`Uint128`],
//!   [`Binary`])
//! - Fractionalizer messages ([`FracInitMsg`], [`FracHandleMsg`],
//!   [`FracQueryMsg`])
//! - Ftoken messages ([`FtokenInitMsg`], [`FtokenHandleMsg`],
//!   [`FtokenQueryMsg`], [`FtokenQueryAnswer`])
//! - The structured contract error envelope ([`ContractError`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod common;
pub mod error;
pub mod fractionalizer;
pub mod ftoken;
pub mod metadata;
mod scalars;

pub use common::{
    AucConf, ContractInfo, FtokenConf, FtokenContrInit, FtokenInit, FtokenInstance, PropConf,
    UndrNftInfo, UploadedFtkn,
};
pub use error::ContractError;
pub use fractionalizer::{FracCountResponse, FracHandleMsg, FracInitMsg, FracQueryMsg};
pub use ftoken::{
    AccessLevel, AllowedNftMsg, Expiration, FtokenHandleMsg, FtokenInitMsg, FtokenQueryAnswer,
    FtokenQueryMsg, InitConfig, InitialBalance, Proposal, Vote,
};
pub use metadata::Metadata;
pub use scalars::{Binary, HumanAddr, Uint128};
