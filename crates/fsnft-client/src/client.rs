//! ChainClient - broadcast, compute and bank endpoints

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::transport::{deserialize_response, Transport};
use crate::types::{Coin, Contract, SendEntry, TxResponse};
use crate::wallet::Wallet;
use crate::ClientError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client tuning knobs
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Interval between inclusion polls after a broadcast
    pub poll_interval: Duration,
    /// How long to wait for inclusion before giving up
    pub broadcast_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            broadcast_timeout: Duration::from_secs(60),
        }
    }
}

/// Chain client bound to one transport, chain id and signer
///
/// All operations are sequential awaits; a broadcast suspends until the
/// transaction is included or the timeout elapses.
pub struct ChainClient {
    transport: Arc<dyn Transport>,
    chain_id: String,
    signer: Wallet,
    options: ClientOptions,
}

impl ChainClient {
    /// Create a client over the HTTP gateway
    #[cfg(feature = "http")]
    pub fn connect(url: &str, chain_id: &str, signer: Wallet) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new(url)), chain_id, signer)
    }

    /// Create a client over an existing transport. Transports are shared so
    /// several clients (one per account) can bind the same chain instance.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        chain_id: &str,
        signer: Wallet,
    ) -> Self {
        Self {
            transport,
            chain_id: chain_id.to_string(),
            signer,
            options: ClientOptions::default(),
        }
    }

    /// Override the default polling options
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// The polling options this client broadcasts with
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// The signer's address
    pub fn address(&self) -> &str {
        self.signer.address()
    }

    /// The chain id this client broadcasts for
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// The shared transport, for binding further clients to the same chain
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    // ==================== Bank ====================

    /// Broadcast a multi-output bank transfer
    pub async fn multi_send(
        &self,
        inputs: &[SendEntry],
        outputs: &[SendEntry],
        gas_limit: u64,
    ) -> Result<TxResponse, ClientError> {
        let msg = json!({
            "multi_send": {
                "inputs": inputs,
                "outputs": outputs,
            }
        });
        self.broadcast(msg, gas_limit).await
    }

    /// Query the native-token balance of an address
    pub async fn balance(&self, address: &str, denom: &str) -> Result<Coin, ClientError> {
        let response = self
            .transport
            .request_json("bank/balance", vec![json!(address), json!(denom)])
            .await?;
        let balance = response
            .get("balance")
            .cloned()
            .ok_or_else(|| ClientError::Serialization("missing balance field".to_string()))?;
        deserialize_response(balance)
    }

    // ==================== Compute ====================

    /// Broadcast a store-code transaction carrying the given bytecode
    pub async fn store_code(
        &self,
        wasm: &[u8],
        gas_limit: u64,
    ) -> Result<TxResponse, ClientError> {
        let msg = json!({
            "store_code": {
                "wasm_byte_code": hex::encode(wasm),
            }
        });
        self.broadcast(msg, gas_limit).await
    }

    /// Broadcast an instantiate transaction for an uploaded code
    pub async fn instantiate<M: Serialize>(
        &self,
        code_id: u64,
        code_hash: &str,
        init_msg: &M,
        label: &str,
        gas_limit: u64,
    ) -> Result<TxResponse, ClientError> {
        let msg = json!({
            "instantiate": {
                "code_id": code_id,
                "code_hash": code_hash,
                "init_msg": serde_json::to_value(init_msg)?,
                "label": label,
            }
        });
        self.broadcast(msg, gas_limit).await
    }

    /// Broadcast an execute transaction against a contract, optionally
    /// attaching native-token funds.
    ///
    /// Returns the transaction result without inspecting its status code;
    /// callers decide what a failure means.
    pub async fn execute<M: Serialize>(
        &self,
        contract: &Contract,
        msg: &M,
        sent_funds: &[Coin],
        gas_limit: u64,
    ) -> Result<TxResponse, ClientError> {
        let msg = json!({
            "execute": {
                "contract": contract.address,
                "code_hash": contract.code_hash,
                "msg": serde_json::to_value(msg)?,
                "sent_funds": sent_funds,
            }
        });
        self.broadcast(msg, gas_limit).await
    }

    /// Run a read-only query against a contract
    ///
    /// The response is inspected structurally: a single-key error envelope
    /// decodes as [`fsnft_types::ContractError`] and surfaces as
    /// [`ClientError::Contract`]; anything else decodes as `T`.
    pub async fn query<M: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        contract: &Contract,
        msg: &M,
    ) -> Result<T, ClientError> {
        let response = self
            .transport
            .request_json(
                "compute/query",
                vec![
                    json!(contract.address),
                    json!(contract.code_hash),
                    serde_json::to_value(msg)?,
                ],
            )
            .await?;

        if let Some(err) = fsnft_types::ContractError::from_query_response(&response) {
            return Err(ClientError::Contract(err));
        }
        deserialize_response(response)
    }

    /// Fetch the content hash of an uploaded code
    pub async fn code_hash(&self, code_id: u64) -> Result<String, ClientError> {
        let response = self
            .transport
            .request_json("compute/code_hash", vec![json!(code_id)])
            .await?;
        deserialize_response(response)
    }

    // ==================== Broadcast ====================

    /// Sign and broadcast a message, then poll at a fixed interval until
    /// the transaction is included or the timeout elapses
    async fn broadcast(&self, msg: Value, gas_limit: u64) -> Result<TxResponse, ClientError> {
        let mut envelope = json!({
            "chain_id": self.chain_id,
            "sender": self.signer.address(),
            "sign_mode": self.signer.mode().as_str(),
            "msg": msg,
            "gas_limit": gas_limit,
        });

        // serde_json orders object keys, so this is canonical
        let sign_doc = envelope.to_string();
        let signature = self.signer.sign_bytes(sign_doc.as_bytes());
        envelope["pub_key"] = json!(self.signer.public_key_hex());
        envelope["signature"] = json!(signature);

        let response = self
            .transport
            .request_json("tx/broadcast", vec![envelope])
            .await?;
        let txhash = response
            .get("txhash")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ClientError::Serialization("missing txhash in broadcast response".to_string()))?
            .to_string();
        debug!(%txhash, "broadcast, polling for inclusion");

        let deadline = Instant::now() + self.options.broadcast_timeout;
        loop {
            let status = self
                .transport
                .request_json("tx/status", vec![json!(txhash)])
                .await?;
            if !status.is_null() {
                return deserialize_response(status);
            }
            if Instant::now() >= deadline {
                return Err(ClientError::Timeout { txhash });
            }
            sleep(self.options.poll_interval).await;
        }
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("chain_id", &self.chain_id)
            .field("address", &self.signer.address())
            .finish_non_exhaustive()
    }
}
