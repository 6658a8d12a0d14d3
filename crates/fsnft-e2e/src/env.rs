//! Test environment setup
//!
//! Uploads the two contract bytecodes, instantiates the fractionalizer
//! with the ftoken code reference, and bundles the result with the
//! provisioned accounts.

use std::path::Path;
use std::sync::Arc;

use fsnft_client::{ChainClient, Coin, Contract, Transport, TxResponse, UploadedCode};
use fsnft_types::{FracInitMsg, UploadedFtkn};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::provision::{provision, Account};
use crate::{E2eError, E2eResult, HarnessConfig};

/// Everything a scenario needs: funded accounts, uploaded codes and the
/// instantiated fractionalizer
pub struct TestEnv {
    /// Provisioned accounts; `accounts[0]` performed the setup transactions
    pub accounts: Vec<Account>,
    /// Uploaded codes in upload order: fractionalizer first, ftoken second
    pub uploaded_codes: Vec<UploadedCode>,
    /// Instantiated contracts; `contracts[0]` is the fractionalizer
    pub contracts: Vec<Contract>,
}

impl TestEnv {
    /// Provision accounts, upload both codes and instantiate the
    /// fractionalizer
    pub async fn setup(transport: Arc<dyn Transport>, config: &HarnessConfig) -> E2eResult<Self> {
        let accounts = provision(&transport, config).await?;
        let operator = &accounts[0];

        let frac_code = upload_code(operator, &config.fractionalizer_wasm, config).await?;
        let ftoken_code = upload_code(operator, &config.ftoken_wasm, config).await?;

        let init = FracInitMsg {
            uploaded_ftoken: UploadedFtkn {
                code_id: ftoken_code.code_id,
                code_hash: ftoken_code.code_hash.clone(),
            },
        };
        let fractionalizer = instantiate(operator, &frac_code, &init, config).await?;
        info!(address = %fractionalizer.address, "fractionalizer ready");

        Ok(Self {
            accounts,
            uploaded_codes: vec![frac_code, ftoken_code],
            contracts: vec![fractionalizer],
        })
    }

    /// The fractionalizer contract
    pub fn fractionalizer(&self) -> &Contract {
        &self.contracts[0]
    }

    /// The uploaded ftoken code
    pub fn ftoken_code(&self) -> &UploadedCode {
        &self.uploaded_codes[1]
    }
}

/// Read bytecode from disk and store it on chain, returning the assigned
/// code id and content hash
pub async fn upload_code(
    account: &Account,
    wasm_path: &Path,
    config: &HarnessConfig,
) -> E2eResult<UploadedCode> {
    let wasm = std::fs::read(wasm_path)?;
    let tx = account.client.store_code(&wasm, config.store_gas).await?;
    ensure_success(&tx)?;

    let code_id = extract_code_id(&tx)?;
    let code_hash = account.client.code_hash(code_id).await?;
    info!(code_id, path = %wasm_path.display(), "stored code");
    Ok(UploadedCode { code_id, code_hash })
}

/// Instantiate an uploaded code under a randomized label
pub async fn instantiate<M: Serialize>(
    account: &Account,
    code: &UploadedCode,
    init_msg: &M,
    config: &HarnessConfig,
) -> E2eResult<Contract> {
    let label = random_label(&account.address);
    let tx = account
        .client
        .instantiate(code.code_id, &code.code_hash, init_msg, &label, config.init_gas)
        .await?;
    ensure_success(&tx)?;

    let address = extract_contract_address(&tx)?;
    Ok(Contract {
        address,
        code_hash: code.code_hash.clone(),
    })
}

/// Execute a handle message against a contract, optionally attaching
/// native-token funds
///
/// The response is returned without inspecting its status code; scenarios
/// assert on success or failure themselves.
pub async fn exec_handle<M: Serialize>(
    account: &Account,
    contract: &Contract,
    msg: &M,
    send_amount: Option<u128>,
    config: &HarnessConfig,
) -> E2eResult<TxResponse> {
    let sent_funds = match send_amount {
        Some(amount) => vec![Coin::new(&config.denom, amount)],
        None => Vec::new(),
    };
    let tx = account
        .client
        .execute(contract, msg, &sent_funds, config.exec_gas)
        .await?;
    info!(code = tx.code, gas_used = tx.gas_used, "executed handle message");
    Ok(tx)
}

/// Run a read-only query against a contract
pub async fn exec_query<M: Serialize, T: DeserializeOwned>(
    client: &ChainClient,
    contract: &Contract,
    msg: &M,
) -> E2eResult<T> {
    Ok(client.query(contract, msg).await?)
}

/// Instance labels must be unique chain-wide; suffix the instantiator's
/// address with a random number
fn random_label(address: &str) -> String {
    let n: u32 = rand::thread_rng().gen_range(0..10_000);
    let tail = &address[address.len().saturating_sub(8)..];
    format!("contract {} {}", tail, n)
}

fn ensure_success(tx: &TxResponse) -> E2eResult<()> {
    if tx.is_success() {
        Ok(())
    } else {
        Err(E2eError::Tx {
            code: tx.code,
            raw_log: tx.raw_log.clone(),
        })
    }
}

fn extract_code_id(tx: &TxResponse) -> E2eResult<u64> {
    let raw = tx
        .find_attribute("code_id")
        .ok_or_else(|| E2eError::MalformedResponse("store-code logs carry no code_id".to_string()))?;
    raw.parse()
        .map_err(|_| E2eError::MalformedResponse(format!("code_id is not a number: {}", raw)))
}

fn extract_contract_address(tx: &TxResponse) -> E2eResult<String> {
    tx.find_event_attribute("message", "contract_address")
        .map(|s| s.to_string())
        .ok_or_else(|| {
            E2eError::MalformedResponse("instantiate logs carry no contract_address".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsnft_client::LogEntry;

    fn tx_with_log(key: &str, value: &str) -> TxResponse {
        TxResponse {
            code: 0,
            txhash: "AB12".to_string(),
            gas_used: 1,
            raw_log: String::new(),
            logs: vec![LogEntry {
                kind: "message".to_string(),
                key: key.to_string(),
                value: value.to_string(),
            }],
        }
    }

    #[test]
    fn test_code_id_extraction() {
        assert_eq!(extract_code_id(&tx_with_log("code_id", "7")).unwrap(), 7);
        assert!(matches!(
            extract_code_id(&tx_with_log("code_id", "seven")),
            Err(E2eError::MalformedResponse(_))
        ));
        assert!(matches!(
            extract_code_id(&tx_with_log("other", "7")),
            Err(E2eError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_contract_address_extraction() {
        let address =
            extract_contract_address(&tx_with_log("contract_address", "frt1abc")).unwrap();
        assert_eq!(address, "frt1abc");
        assert!(matches!(
            extract_contract_address(&tx_with_log("code_id", "7")),
            Err(E2eError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_labels_embed_the_address_tail() {
        let label = random_label("frt1deadbeefcafe");
        assert!(label.contains("beefcafe"));
        // Two draws colliding is possible but vanishingly unlikely to
        // repeat across the retry below
        let other = random_label("frt1deadbeefcafe");
        let third = random_label("frt1deadbeefcafe");
        assert!(label != other || label != third);
    }

    #[test]
    fn test_failed_tx_maps_to_tx_error() {
        let mut tx = tx_with_log("code_id", "7");
        tx.code = 5;
        tx.raw_log = "insufficient funds".to_string();
        match ensure_success(&tx) {
            Err(E2eError::Tx { code: 5, raw_log }) => {
                assert!(raw_log.contains("insufficient funds"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
