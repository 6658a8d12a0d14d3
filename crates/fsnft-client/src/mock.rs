//! In-process mock devnet
//!
//! Implements [`Transport`] over a small in-memory chain model: a balances
//! ledger, uploaded codes with sha256 content hashes, instantiated
//! contracts with label-collision detection, and immediately included
//! transactions. It models only the surface the harness consumes; there is
//! no contract runtime behind it, so contract queries return canned
//! responses registered by the test.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::transport::Transport;
use crate::types::{Coin, LogEntry, SendEntry, TxResponse};
use crate::ClientError;

struct StoredCode {
    code_hash: String,
}

struct StoredContract {
    code_hash: String,
}

#[derive(Default)]
struct MockState {
    /// address -> denom -> amount
    balances: HashMap<String, HashMap<String, u128>>,
    /// code_id = index + 1
    codes: Vec<StoredCode>,
    contracts: HashMap<String, StoredContract>,
    labels: HashSet<String>,
    /// included transactions by hash
    txs: HashMap<String, Value>,
    /// canned query responses by contract address
    query_responses: HashMap<String, Value>,
    tx_counter: u64,
}

/// Mock devnet transport for hermetic tests
pub struct MockChain {
    state: Mutex<MockState>,
}

impl MockChain {
    /// Create an empty mock chain
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Credit an address, creating it if needed. Used to seed genesis
    /// balances in tests.
    pub fn fund(&self, address: &str, denom: &str, amount: u128) {
        let mut state = self.lock();
        let entry = state
            .balances
            .entry(address.to_string())
            .or_default()
            .entry(denom.to_string())
            .or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Current balance of an address
    pub fn balance_of(&self, address: &str, denom: &str) -> u128 {
        self.lock()
            .balances
            .get(address)
            .and_then(|coins| coins.get(denom))
            .copied()
            .unwrap_or(0)
    }

    /// Register the response the given contract returns to any query
    pub fn set_query_response(&self, contract_address: &str, response: Value) {
        self.lock()
            .query_responses
            .insert(contract_address.to_string(), response);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A poisoned lock means a test already panicked; nothing to salvage.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn include_tx(&self, envelope: &Value) -> Result<Value, ClientError> {
        let mut state = self.lock();

        state.tx_counter += 1;
        let mut hasher = Sha256::new();
        hasher.update(envelope.to_string().as_bytes());
        hasher.update(state.tx_counter.to_be_bytes());
        let txhash = hex::encode_upper(hasher.finalize());

        let response = execute_envelope(&mut state, envelope, &txhash);
        let value = serde_json::to_value(&response)?;
        state.txs.insert(txhash.clone(), value);
        Ok(json!({ "txhash": txhash }))
    }

    fn tx_status(&self, txhash: &str) -> Value {
        self.lock().txs.get(txhash).cloned().unwrap_or(Value::Null)
    }

    fn bank_balance(&self, address: &str, denom: &str) -> Value {
        let amount = self.balance_of(address, denom);
        json!({ "balance": { "denom": denom, "amount": amount.to_string() } })
    }

    fn code_hash(&self, code_id: u64) -> Result<Value, ClientError> {
        let state = self.lock();
        let code = code_id
            .checked_sub(1)
            .and_then(|i| state.codes.get(i as usize))
            .ok_or_else(|| ClientError::Rpc {
                code: 3,
                message: format!("code id {} not found", code_id),
            })?;
        Ok(Value::String(code.code_hash.clone()))
    }

    fn contract_query(&self, address: &str) -> Value {
        let state = self.lock();
        if !state.contracts.contains_key(address) {
            return json!({ "generic_err": { "msg": format!("contract not found: {}", address) } });
        }
        state
            .query_responses
            .get(address)
            .cloned()
            .unwrap_or_else(|| json!({ "parse_err": { "msg": "unknown query variant" } }))
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockChain {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        let mut params = params.into_iter();
        let mut next = |name: &str| {
            params.next().ok_or_else(|| ClientError::Rpc {
                code: -32602,
                message: format!("missing param: {}", name),
            })
        };

        match method {
            "tx/broadcast" => {
                let envelope = next("tx")?;
                self.include_tx(&envelope)
            }
            "tx/status" => {
                let txhash = next("txhash")?;
                let txhash = txhash.as_str().ok_or_else(|| ClientError::Rpc {
                    code: -32602,
                    message: "txhash must be a string".to_string(),
                })?;
                Ok(self.tx_status(txhash))
            }
            "bank/balance" => {
                let address = next("address")?;
                let denom = next("denom")?;
                match (address.as_str(), denom.as_str()) {
                    (Some(a), Some(d)) => Ok(self.bank_balance(a, d)),
                    _ => Err(ClientError::Rpc {
                        code: -32602,
                        message: "address and denom must be strings".to_string(),
                    }),
                }
            }
            "compute/code_hash" => {
                let code_id = next("code_id")?;
                let code_id = code_id.as_u64().ok_or_else(|| ClientError::Rpc {
                    code: -32602,
                    message: "code_id must be a number".to_string(),
                })?;
                self.code_hash(code_id)
            }
            "compute/query" => {
                let address = next("contract_address")?;
                let _code_hash = next("code_hash")?;
                let _query = next("query")?;
                let address = address.as_str().ok_or_else(|| ClientError::Rpc {
                    code: -32602,
                    message: "contract_address must be a string".to_string(),
                })?;
                Ok(self.contract_query(address))
            }
            _ => Err(ClientError::Rpc {
                code: -32601,
                message: format!("method not found: {}", method),
            }),
        }
    }
}

// ==================== Transaction execution ====================

fn execute_envelope(state: &mut MockState, envelope: &Value, txhash: &str) -> TxResponse {
    let sender = envelope["sender"].as_str().unwrap_or_default().to_string();
    let signature = envelope["signature"].as_str().unwrap_or_default();
    if sender.is_empty() || signature.is_empty() {
        return failure(txhash, 4, "signature verification failed");
    }

    let msg = &envelope["msg"];
    if let Some(body) = msg.get("multi_send") {
        apply_multi_send(state, txhash, body)
    } else if let Some(body) = msg.get("store_code") {
        apply_store_code(state, txhash, body)
    } else if let Some(body) = msg.get("instantiate") {
        apply_instantiate(state, txhash, body)
    } else if let Some(body) = msg.get("execute") {
        apply_execute(state, txhash, &sender, body)
    } else {
        failure(txhash, 2, "unknown message type")
    }
}

fn apply_multi_send(state: &mut MockState, txhash: &str, body: &Value) -> TxResponse {
    let inputs: Vec<SendEntry> = match serde_json::from_value(body["inputs"].clone()) {
        Ok(v) => v,
        Err(e) => return failure(txhash, 2, &format!("malformed inputs: {}", e)),
    };
    let outputs: Vec<SendEntry> = match serde_json::from_value(body["outputs"].clone()) {
        Ok(v) => v,
        Err(e) => return failure(txhash, 2, &format!("malformed outputs: {}", e)),
    };

    if coin_totals(&inputs) != coin_totals(&outputs) {
        return failure(txhash, 4, "sum of inputs does not equal sum of outputs");
    }

    for input in &inputs {
        for coin in &input.coins {
            let held = state
                .balances
                .get(&input.address)
                .and_then(|coins| coins.get(&coin.denom))
                .copied()
                .unwrap_or(0);
            if held < coin.amount.u128() {
                return failure(
                    txhash,
                    5,
                    &format!("insufficient funds: {} < {}{}", held, coin.amount, coin.denom),
                );
            }
        }
    }

    for input in &inputs {
        for coin in &input.coins {
            debit(state, &input.address, &coin.denom, coin.amount.u128());
        }
    }
    for output in &outputs {
        for coin in &output.coins {
            credit(state, &output.address, &coin.denom, coin.amount.u128());
        }
    }

    TxResponse {
        code: 0,
        txhash: txhash.to_string(),
        gas_used: 60_000 + 5_000 * outputs.len() as u64,
        raw_log: String::new(),
        logs: Vec::new(),
    }
}

fn apply_store_code(state: &mut MockState, txhash: &str, body: &Value) -> TxResponse {
    let wasm_hex = body["wasm_byte_code"].as_str().unwrap_or_default();
    let wasm = match hex::decode(wasm_hex) {
        Ok(bytes) if !bytes.is_empty() => bytes,
        _ => return failure(txhash, 2, "malformed wasm byte code"),
    };

    let code_hash = hex::encode(Sha256::digest(&wasm));
    state.codes.push(StoredCode {
        code_hash: code_hash.clone(),
    });
    let code_id = state.codes.len() as u64;

    TxResponse {
        code: 0,
        txhash: txhash.to_string(),
        gas_used: 100_000 + wasm.len() as u64 * 10,
        raw_log: String::new(),
        logs: vec![LogEntry {
            kind: "message".to_string(),
            key: "code_id".to_string(),
            value: code_id.to_string(),
        }],
    }
}

fn apply_instantiate(state: &mut MockState, txhash: &str, body: &Value) -> TxResponse {
    let code_id = body["code_id"].as_u64().unwrap_or(0);
    let code_hash = body["code_hash"].as_str().unwrap_or_default();
    let label = body["label"].as_str().unwrap_or_default();

    let stored = match code_id.checked_sub(1).and_then(|i| state.codes.get(i as usize)) {
        Some(code) => code,
        None => return failure(txhash, 3, &format!("code id {} not found", code_id)),
    };
    if stored.code_hash != code_hash {
        return failure(txhash, 3, "code hash mismatch");
    }
    if label.is_empty() {
        return failure(txhash, 2, "label must not be empty");
    }
    if !state.labels.insert(label.to_string()) {
        return failure(txhash, 2, &format!("label already exists: {}", label));
    }

    let mut hasher = Sha256::new();
    hasher.update(code_id.to_be_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let address = format!("frt1{}", hex::encode(&digest[..20]));

    state.contracts.insert(
        address.clone(),
        StoredContract {
            code_hash: code_hash.to_string(),
        },
    );

    TxResponse {
        code: 0,
        txhash: txhash.to_string(),
        gas_used: 150_000,
        raw_log: String::new(),
        logs: vec![LogEntry {
            kind: "message".to_string(),
            key: "contract_address".to_string(),
            value: address,
        }],
    }
}

fn apply_execute(state: &mut MockState, txhash: &str, sender: &str, body: &Value) -> TxResponse {
    let address = body["contract"].as_str().unwrap_or_default();
    let code_hash = body["code_hash"].as_str().unwrap_or_default();

    let contract = match state.contracts.get(address) {
        Some(c) => c,
        None => return failure(txhash, 3, &format!("contract not found: {}", address)),
    };
    if contract.code_hash != code_hash {
        return failure(txhash, 3, "code hash mismatch");
    }

    let sent_funds: Vec<Coin> = body
        .get("sent_funds")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();
    for coin in &sent_funds {
        let held = state
            .balances
            .get(sender)
            .and_then(|coins| coins.get(&coin.denom))
            .copied()
            .unwrap_or(0);
        if held < coin.amount.u128() {
            return failure(
                txhash,
                5,
                &format!("insufficient funds: {} < {}{}", held, coin.amount, coin.denom),
            );
        }
    }
    let address = address.to_string();
    for coin in &sent_funds {
        debit(state, sender, &coin.denom, coin.amount.u128());
        credit(state, &address, &coin.denom, coin.amount.u128());
    }

    let msg_len = body["msg"].to_string().len() as u64;
    TxResponse {
        code: 0,
        txhash: txhash.to_string(),
        gas_used: 25_000 + msg_len * 30,
        raw_log: String::new(),
        logs: vec![LogEntry {
            kind: "message".to_string(),
            key: "contract_address".to_string(),
            value: address,
        }],
    }
}

fn coin_totals(entries: &[SendEntry]) -> HashMap<String, u128> {
    let mut totals: HashMap<String, u128> = HashMap::new();
    for entry in entries {
        for coin in &entry.coins {
            *totals.entry(coin.denom.clone()).or_insert(0) += coin.amount.u128();
        }
    }
    totals
}

fn debit(state: &mut MockState, address: &str, denom: &str, amount: u128) {
    if let Some(held) = state
        .balances
        .get_mut(address)
        .and_then(|coins| coins.get_mut(denom))
    {
        *held = held.saturating_sub(amount);
    }
}

fn credit(state: &mut MockState, address: &str, denom: &str, amount: u128) {
    let entry = state
        .balances
        .entry(address.to_string())
        .or_default()
        .entry(denom.to_string())
        .or_insert(0);
    *entry = entry.saturating_add(amount);
}

fn failure(txhash: &str, code: u32, raw_log: &str) -> TxResponse {
    TxResponse {
        code,
        txhash: txhash.to_string(),
        gas_used: 0,
        raw_log: raw_log.to_string(),
        logs: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fund_and_balance() {
        let chain = MockChain::new();
        assert_eq!(chain.balance_of("frt1a", "ufrt"), 0);
        chain.fund("frt1a", "ufrt", 1_000);
        chain.fund("frt1a", "ufrt", 500);
        assert_eq!(chain.balance_of("frt1a", "ufrt"), 1_500);
    }

    #[tokio::test]
    async fn test_unknown_method_is_rejected() {
        let chain = MockChain::new();
        let result = chain.request_json("no_such_method", vec![]).await;
        assert!(matches!(result, Err(ClientError::Rpc { code: -32601, .. })));
    }

    #[tokio::test]
    async fn test_unsigned_tx_fails_verification() {
        let chain = MockChain::new();
        let envelope = json!({ "sender": "frt1a", "signature": "", "msg": {} });
        let broadcast = chain
            .request_json("tx/broadcast", vec![envelope])
            .await
            .unwrap();
        let status = chain
            .request_json("tx/status", vec![broadcast["txhash"].clone()])
            .await
            .unwrap();
        assert_eq!(status["code"], 4);
    }

    #[tokio::test]
    async fn test_query_against_unknown_contract_returns_error_envelope() {
        let chain = MockChain::new();
        let result = chain
            .request_json(
                "compute/query",
                vec![json!("frt1ghost"), json!("hash"), json!({"get_count": {}})],
            )
            .await
            .unwrap();
        assert!(result.get("generic_err").is_some());
    }
}
