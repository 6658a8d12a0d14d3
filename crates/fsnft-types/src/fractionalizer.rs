//! Fractionalizer contract messages

use serde::{Deserialize, Serialize};

use crate::common::{FtokenInit, FtokenInstance, UndrNftInfo, UploadedFtkn};
use crate::scalars::{Binary, HumanAddr};

/// Fractionalizer instantiate message
///
/// The fractionalizer needs the uploaded ftoken code reference so it can
/// spawn a per-asset token contract for each fractionalized NFT.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FracInitMsg {
    /// Code id and hash of the previously uploaded ftoken bytecode
    pub uploaded_ftoken: UploadedFtkn,
}

/// Fractionalizer execute messages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FracHandleMsg {
    /// Receiver interface for the NFT contract. Called by the NFT contract
    /// when tokens are sent to the fractionalizer.
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
    /// Transfer an NFT owned by the fractionalizer
    TransferNft {
        /// Address of the NFT contract
        nft_contr_addr: HumanAddr,
        /// Code hash of the NFT contract
        nft_contr_hash: String,
        /// Recipient of the NFT
        recipient: HumanAddr,
        /// Token id to transfer
        token_id: String,
    },
    /// Callback from a freshly instantiated ftoken contract
    ReceiveFtokenCallback {
        /// Instance record of the spawned ftoken contract
        ftkn_instance: FtokenInstance,
    },
    /// Fractionalize an NFT. The caller must first grant the fractionalizer
    /// transfer permission on the token.
    Fractionalize {
        /// Underlying NFT information
        nft_info: UndrNftInfo,
        /// Initial configuration of the fractionalized token
        ftkn_init: FtokenInit,
    },
}

/// Fractionalizer query messages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FracQueryMsg {
    /// Number and addresses of spawned ftoken contracts
    GetCount {},
}

/// Response to [`FracQueryMsg::GetCount`]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FracCountResponse {
    /// Addresses of spawned ftoken contracts
    pub count: Vec<HumanAddr>,
}
