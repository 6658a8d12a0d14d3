//! Ftoken (per-asset token) contract messages
//!
//! The ftoken contract is a fungible token with added auction, staking and
//! governance-proposal operations. Its execute surface is the union of the
//! standard token operations and the fractionalization-specific ones.

use serde::{Deserialize, Serialize};

use crate::common::{FtokenConf, FtokenContrInit};
use crate::metadata::Metadata;
use crate::scalars::{Binary, HumanAddr, Uint128};

// ==================== Instantiate ====================

/// Ftoken instantiate message, sent by the fractionalizer when a
/// fractionalize call spawns a new per-asset token contract
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FtokenInitMsg {
    /// Fractionalizer-supplied instance information
    pub init_info: FtokenContrInit,
    /// Token name
    pub name: String,
    /// Optional admin address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<HumanAddr>,
    /// Token symbol
    pub symbol: String,
    /// Token decimals
    pub decimals: u8,
    /// Optional initial balances
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_balances: Option<Vec<InitialBalance>>,
    /// Pseudo-random seed for the contract's entropy pool
    pub prng_seed: Binary,
    /// Optional token configuration overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<InitConfig>,
}

/// An address and its initial token balance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitialBalance {
    /// Holder address
    pub address: HumanAddr,
    /// Initial amount
    pub amount: Uint128,
}

/// Optional token configuration values; all default to the more private
/// setting when omitted
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InitConfig {
    /// Whether total supply is publicly queryable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_total_supply: Option<bool>,
    /// Whether native-token deposit is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_deposit: Option<bool>,
    /// Whether redeem is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_redeem: Option<bool>,
    /// Whether mint is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_mint: Option<bool>,
    /// Whether burn is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_burn: Option<bool>,
}

// ==================== Execute ====================

/// Ftoken execute messages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FtokenHandleMsg {
    /// Standard token transfer
    Transfer {
        /// Recipient address
        recipient: HumanAddr,
        /// Amount to transfer
        amount: Uint128,
        /// Optional memo
        #[serde(skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
        /// Optional message length padding
        #[serde(skip_serializing_if = "Option::is_none")]
        padding: Option<String>,
    },
    /// Send tokens to a contract and trigger its receiver interface
    Send {
        /// Recipient address
        recipient: HumanAddr,
        /// Code hash of the recipient, when it is a contract
        #[serde(skip_serializing_if = "Option::is_none")]
        recipient_code_hash: Option<String>,
        /// Amount to send
        amount: Uint128,
        /// Optional callback message for the receiver
        #[serde(skip_serializing_if = "Option::is_none")]
        msg: Option<Binary>,
        /// Optional memo
        #[serde(skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
        /// Optional message length padding
        #[serde(skip_serializing_if = "Option::is_none")]
        padding: Option<String>,
    },
    /// Increase a spender's allowance
    IncreaseAllowance {
        /// Spender address
        spender: HumanAddr,
        /// Amount to add
        amount: Uint128,
        /// Optional expiration as a unix timestamp
        #[serde(skip_serializing_if = "Option::is_none")]
        expiration: Option<u64>,
        /// Optional message length padding
        #[serde(skip_serializing_if = "Option::is_none")]
        padding: Option<String>,
    },
    /// Decrease a spender's allowance
    DecreaseAllowance {
        /// Spender address
        spender: HumanAddr,
        /// Amount to subtract
        amount: Uint128,
        /// Optional expiration as a unix timestamp
        #[serde(skip_serializing_if = "Option::is_none")]
        expiration: Option<u64>,
        /// Optional message length padding
        #[serde(skip_serializing_if = "Option::is_none")]
        padding: Option<String>,
    },
    /// Set the caller's viewing key for authenticated queries
    SetViewingKey {
        /// Desired viewing key
        key: String,
        /// Optional message length padding
        #[serde(skip_serializing_if = "Option::is_none")]
        padding: Option<String>,
    },
    /// Receiver interface for the NFT contract
    BatchReceiveNft {
        /// Address that sent the tokens
        sender: HumanAddr,
        /// Previous owner of the sent tokens
        from: HumanAddr,
        /// Tokens that were sent
        token_ids: Vec<String>,
        /// Optional message to control receiving logic
        #[serde(skip_serializing_if = "Option::is_none")]
        msg: Option<Binary>,
    },
    /// Place a bid to buy out the underlying NFT
    Bid {
        /// Bid amount in the configured bid token
        amount: Uint128,
    },
    /// Stake ftokens to gain voting power
    Stake {
        /// Amount to stake
        amount: Uint128,
    },
    /// Unstake previously staked ftokens
    Unstake {
        /// Amount to unstake
        amount: Uint128,
    },
    /// Vote on a live proposal
    VoteProposal {
        /// Proposal id
        prop_id: u32,
        /// Vote choice
        vote: Vote,
    },
    /// Finalize an auction once its period has elapsed
    FinalizeAuction {},
    /// Retrieve a losing bid after auction finalization
    RetrieveBid {},
    /// Claim sale proceeds after a successful buyout
    ClaimProceeds {},
    /// Make a governance proposal, bonding the given stake
    Propose {
        /// Proposed action
        proposal: Proposal,
        /// Stake bonded with the proposal
        stake: Uint128,
    },
    /// Finalize and, if passed, execute a proposal
    FinalizeExecuteProp {
        /// Proposal id
        prop_id: u32,
    },
    /// Retrieve the stake bonded with a finalized proposal
    RetrievePropStake {
        /// Proposal id
        prop_id: u32,
    },
    /// Vote on the reservation price for the underlying NFT
    VoteReservationPrice {
        /// Voted reservation price
        resv_price: Uint128,
    },
}

/// Vote choice on a proposal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    /// In favor
    Yes,
    /// Against
    No,
    /// Against, counting toward the veto threshold
    Veto,
    /// Counted for quorum only
    Abstain,
}

/// Governance proposal payloads
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proposal {
    /// Send an approved message to the underlying NFT contract
    MsgToNft {
        /// Message to forward
        msg: AllowedNftMsg,
    },
    /// Change the ftoken configuration
    ChangeConfig {
        /// New configuration
        config: FtokenConf,
    },
}

/// Messages that proposals are allowed to forward to the underlying NFT
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedNftMsg {
    /// Set public and/or private metadata
    SetMetadata {
        /// Optional new public metadata
        #[serde(skip_serializing_if = "Option::is_none")]
        public_metadata: Option<Metadata>,
        /// Optional new private metadata
        #[serde(skip_serializing_if = "Option::is_none")]
        private_metadata: Option<Metadata>,
    },
    /// Reveal the private metadata of a sealed token
    Reveal {},
    /// Make token ownership private
    MakeOwnershipPrivate {},
    /// Add or remove approvals that whitelist everyone
    SetGlobalApproval {
        /// Optional permission level for viewing the owner
        #[serde(skip_serializing_if = "Option::is_none")]
        view_owner: Option<AccessLevel>,
        /// Optional permission level for viewing private metadata
        #[serde(skip_serializing_if = "Option::is_none")]
        view_private_metadata: Option<AccessLevel>,
        /// Optional expiration
        #[serde(skip_serializing_if = "Option::is_none")]
        expires: Option<Expiration>,
    },
    /// Add or remove approvals for a specific address
    SetWhitelistedApproval {
        /// Address being granted or revoked permission
        address: HumanAddr,
        /// Optional permission level for viewing the owner
        #[serde(skip_serializing_if = "Option::is_none")]
        view_owner: Option<AccessLevel>,
        /// Optional permission level for viewing private metadata
        #[serde(skip_serializing_if = "Option::is_none")]
        view_private_metadata: Option<AccessLevel>,
        /// Optional expiration
        #[serde(skip_serializing_if = "Option::is_none")]
        expires: Option<Expiration>,
    },
}

/// Permission level for NFT approvals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Approve for the specified token only
    ApproveToken,
    /// Approve for the whole inventory
    All,
    /// Revoke approval for the specified token
    RevokeToken,
    /// Remove all approvals
    None,
}

/// Approval expiration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiration {
    /// Expires at the given block height
    AtHeight(u64),
    /// Expires at the given unix timestamp
    AtTime(u64),
    /// Never expires
    Never {},
}

// ==================== Query ====================

/// Ftoken query messages (viewing-key authenticated where applicable)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FtokenQueryMsg {
    /// Token balance of an address
    Balance {
        /// Holder address
        address: HumanAddr,
        /// Viewing key of the holder
        key: String,
    },
    /// Allowance granted by `owner` to `spender`
    Allowance {
        /// Allowance owner
        owner: HumanAddr,
        /// Allowance spender
        spender: HumanAddr,
        /// Viewing key of either party
        key: String,
    },
    /// Public token parameters
    TokenInfo {},
    /// Transfer history of an address
    TransferHistory {
        /// Holder address
        address: HumanAddr,
        /// Viewing key of the holder
        key: String,
        /// Optional page, defaults to 0
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        /// Page size
        page_size: u32,
    },
    /// Full transaction history of an address
    TransactionHistory {
        /// Holder address
        address: HumanAddr,
        /// Viewing key of the holder
        key: String,
        /// Optional page, defaults to 0
        #[serde(skip_serializing_if = "Option::is_none")]
        page: Option<u32>,
        /// Page size
        page_size: u32,
    },
}

/// Ftoken query responses
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FtokenQueryAnswer {
    /// Response to [`FtokenQueryMsg::Balance`]
    Balance {
        /// Token balance
        amount: Uint128,
    },
    /// Response to [`FtokenQueryMsg::Allowance`]
    Allowance {
        /// Allowance owner
        owner: HumanAddr,
        /// Allowance spender
        spender: HumanAddr,
        /// Remaining allowance
        allowance: Uint128,
        /// Optional expiration as a unix timestamp
        #[serde(skip_serializing_if = "Option::is_none")]
        expiration: Option<u64>,
    },
    /// Response to [`FtokenQueryMsg::TokenInfo`]
    TokenInfo {
        /// Token name
        name: String,
        /// Token symbol
        symbol: String,
        /// Token decimals
        decimals: u8,
        /// Total supply, when publicly queryable
        #[serde(skip_serializing_if = "Option::is_none")]
        total_supply: Option<Uint128>,
    },
    /// Authentication failure for a viewing-key query
    ViewingKeyError {
        /// Failure description
        msg: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_wire_shape() {
        let msg = FtokenHandleMsg::Transfer {
            recipient: "frt1recipient".to_string(),
            amount: Uint128::from(250),
            memo: None,
            padding: None,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"transfer":{"recipient":"frt1recipient","amount":"250"}}"#
        );
    }

    #[test]
    fn test_vote_proposal_tags() {
        let msg = FtokenHandleMsg::VoteProposal {
            prop_id: 3,
            vote: Vote::Veto,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["vote_proposal"]["vote"], "veto");
    }

    #[test]
    fn test_empty_variants_serialize_as_empty_objects() {
        let json = serde_json::to_string(&FtokenHandleMsg::FinalizeAuction {}).unwrap();
        assert_eq!(json, r#"{"finalize_auction":{}}"#);
        let json = serde_json::to_string(&FtokenQueryMsg::TokenInfo {}).unwrap();
        assert_eq!(json, r#"{"token_info":{}}"#);
    }

    #[test]
    fn test_proposal_round_trip() {
        let prop = Proposal::MsgToNft {
            msg: AllowedNftMsg::SetWhitelistedApproval {
                address: "frt1viewer".to_string(),
                view_owner: Some(AccessLevel::All),
                view_private_metadata: None,
                expires: Some(Expiration::AtHeight(1_000_000)),
            },
        };
        let json = serde_json::to_string(&prop).unwrap();
        let back: Proposal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prop);
    }

    #[test]
    fn test_query_answer_balance_decodes() {
        let answer: FtokenQueryAnswer =
            serde_json::from_str(r#"{"balance":{"amount":"100000000000"}}"#).unwrap();
        assert_eq!(
            answer,
            FtokenQueryAnswer::Balance {
                amount: Uint128::from(100_000_000_000)
            }
        );
    }

    #[test]
    fn test_init_msg_omits_absent_options() {
        let msg = FtokenInitMsg {
            init_info: FtokenContrInit::default(),
            name: "frac token".to_string(),
            admin: None,
            symbol: "FRK".to_string(),
            decimals: 6,
            initial_balances: None,
            prng_seed: "c2VlZA==".to_string(),
            config: None,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.get("admin").is_none());
        assert!(json.get("initial_balances").is_none());
        assert_eq!(json["prng_seed"], "c2VlZA==");
    }
}
