//! Structs shared between the fractionalizer and ftoken message surfaces

use serde::{Deserialize, Serialize};

use crate::scalars::{HumanAddr, Uint128};

/// Code hash and address of a deployed contract
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Contract's code hash
    pub code_hash: String,
    /// Contract's human-readable address
    pub address: HumanAddr,
}

/// Underlying NFT information
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndrNftInfo {
    /// Token id of the underlying NFT
    pub token_id: String,
    /// Code hash and address of the NFT contract
    pub nft_contr: ContractInfo,
}

/// Reference to an uploaded ftoken code, stored by the fractionalizer at
/// instantiation so it can spawn per-asset token contracts later
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFtkn {
    /// Numeric code id assigned by the chain
    pub code_id: u64,
    /// Content hash of the uploaded bytecode
    pub code_hash: String,
}

/// Auction configuration, nested in [`FtokenConf`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AucConf {
    /// Token that bids are denominated in
    pub bid_token: ContractInfo,
    /// Number of blocks a bid remains live before the auction can be finalized
    pub auc_period: u64,
    /// Percentage boundary above and below the current reservation price
    /// within which reservation-price votes must fall
    pub resv_boundary: u32,
    /// Minimum bid increment in basis points
    pub min_bid_inc: u32,
    /// Proportion of total ftoken supply, in basis points, required before
    /// the underlying NFT unlocks
    pub unlock_threshold: Uint128,
}

/// Governance-proposal configuration, nested in [`FtokenConf`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropConf {
    /// Minimum ftoken stake required to make a proposal
    pub min_stake: Uint128,
    /// Number of blocks a proposal remains live before finalization
    pub vote_period: u64,
    /// Quorum proportion of total supply, in basis points
    pub vote_quorum: Uint128,
    /// Veto threshold proportion of total supply, in basis points
    pub veto_threshold: Uint128,
}

/// Overall ftoken configuration, sent in the fractionalize call and stored
/// by the per-asset token contract
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FtokenConf {
    /// Number of blocks that ftokens stay bonded after a vote
    pub min_ftkn_bond_prd: u64,
    /// Ownership proportion, in basis points, required to view the
    /// underlying NFT's private metadata
    pub priv_metadata_view_threshold: u32,
    /// Auction parameters
    pub auc_conf: AucConf,
    /// Proposal parameters
    pub prop_conf: PropConf,
}

/// Per-asset token instance record, created when a fractionalize call spawns
/// a new ftoken contract
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FtokenInstance {
    /// Index of the ftoken contract from the fractionalizer's perspective
    pub ftkn_idx: u32,
    /// Address that deposited the NFT
    pub depositor: HumanAddr,
    /// Code hash and address of the ftoken contract
    pub ftoken_contr: ContractInfo,
    /// Underlying NFT deposited at fractionalization
    pub init_nft_info: UndrNftInfo,
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Token decimals
    pub decimals: u8,
}

/// User-supplied initial configuration for the token minted by a
/// fractionalize call
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FtokenInit {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Supply in the lowest denomination
    pub supply: Uint128,
    /// Token decimals
    pub decimals: u8,
    /// Label for the spawned ftoken contract; instantiation fails if the
    /// label already exists on-chain
    pub contract_label: String,
    /// Initial reservation price seeding the first reservation-price vote
    pub init_resv_price: Uint128,
    /// Configuration stored in the ftoken contract
    pub ftkn_conf: FtokenConf,
}

/// Information passed from the fractionalizer to the ftoken contract in its
/// instantiate message
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FtokenContrInit {
    /// Index of the ftoken contract, starting from 0
    pub ftkn_idx: u32,
    /// Depositor of the NFT
    pub depositor: HumanAddr,
    /// Code hash of the fractionalizer contract
    pub fract_hash: String,
    /// Underlying NFT info
    pub nft_info: UndrNftInfo,
    /// Initial reservation price
    pub init_resv_price: Uint128,
    /// Configuration stored in the ftoken contract
    pub ftkn_conf: FtokenConf,
}
