//! Client integration tests against the mock devnet
//!
//! Exercises the broadcast-and-poll path end to end: store code,
//! instantiate, execute with funds, bank transfers and structural query
//! error detection.

use std::sync::Arc;

use fsnft_client::{ChainClient, ClientError, Coin, Contract, MockChain, SendEntry, SignMode, Wallet};
use fsnft_types::{FracCountResponse, FracInitMsg, FracQueryMsg, UploadedFtkn};
use serde_json::json;

const CHAIN_ID: &str = "fsnft-dev-1";
const DENOM: &str = "ufrt";

fn client_on(chain: &Arc<MockChain>) -> ChainClient {
    let wallet = Wallet::new_random(SignMode::Amino).unwrap();
    ChainClient::with_transport(Arc::clone(chain) as Arc<dyn fsnft_client::Transport>, CHAIN_ID, wallet)
}

async fn upload(client: &ChainClient, wasm: &[u8]) -> (u64, String) {
    let tx = client.store_code(wasm, 5_000_000).await.unwrap();
    assert!(tx.is_success(), "store_code failed: {}", tx.raw_log);
    let code_id: u64 = tx.find_attribute("code_id").unwrap().parse().unwrap();
    let code_hash = client.code_hash(code_id).await.unwrap();
    (code_id, code_hash)
}

// ==================== Store code ====================

#[tokio::test]
async fn test_store_code_assigns_sequential_ids_and_stable_hashes() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);

    let (id_a, hash_a) = upload(&client, b"contract bytecode").await;
    let (id_b, hash_b) = upload(&client, b"contract bytecode").await;

    assert_ne!(id_a, id_b);
    assert_eq!(hash_a, hash_b);
}

#[tokio::test]
async fn test_code_hash_of_unknown_code_is_an_error() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    let result = client.code_hash(99).await;
    assert!(matches!(result, Err(ClientError::Rpc { .. })));
}

// ==================== Instantiate ====================

#[tokio::test]
async fn test_instantiate_emits_contract_address() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    let (code_id, code_hash) = upload(&client, b"fractionalizer").await;

    let init = FracInitMsg {
        uploaded_ftoken: UploadedFtkn {
            code_id,
            code_hash: code_hash.clone(),
        },
    };
    let tx = client
        .instantiate(code_id, &code_hash, &init, "frac one", 1_000_000)
        .await
        .unwrap();
    assert!(tx.is_success());

    let address = tx
        .find_event_attribute("message", "contract_address")
        .unwrap();
    assert!(address.starts_with("frt1"));
}

#[tokio::test]
async fn test_duplicate_label_is_rejected() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    let (code_id, code_hash) = upload(&client, b"fractionalizer").await;
    let init = json!({});

    let first = client
        .instantiate(code_id, &code_hash, &init, "same label", 1_000_000)
        .await
        .unwrap();
    assert!(first.is_success());

    let second = client
        .instantiate(code_id, &code_hash, &init, "same label", 1_000_000)
        .await
        .unwrap();
    assert!(!second.is_success());
    assert!(second.raw_log.contains("label already exists"));
}

#[tokio::test]
async fn test_distinct_labels_get_distinct_addresses() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    let (code_id, code_hash) = upload(&client, b"fractionalizer").await;
    let init = json!({});

    let a = client
        .instantiate(code_id, &code_hash, &init, "label a", 1_000_000)
        .await
        .unwrap();
    let b = client
        .instantiate(code_id, &code_hash, &init, "label b", 1_000_000)
        .await
        .unwrap();

    assert_ne!(
        a.find_attribute("contract_address"),
        b.find_attribute("contract_address")
    );
}

// ==================== Bank ====================

#[tokio::test]
async fn test_multi_send_moves_funds_to_every_output() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    chain.fund(client.address(), DENOM, 300);

    let outputs: Vec<SendEntry> = ["frt1aaa", "frt1bbb", "frt1ccc"]
        .iter()
        .map(|addr| SendEntry {
            address: addr.to_string(),
            coins: vec![Coin::new(DENOM, 100)],
        })
        .collect();
    let inputs = vec![SendEntry {
        address: client.address().to_string(),
        coins: vec![Coin::new(DENOM, 300)],
    }];

    let tx = client.multi_send(&inputs, &outputs, 200_000).await.unwrap();
    assert!(tx.is_success(), "multi_send failed: {}", tx.raw_log);

    for output in &outputs {
        assert_eq!(chain.balance_of(&output.address, DENOM), 100);
    }
    assert_eq!(chain.balance_of(client.address(), DENOM), 0);
}

#[tokio::test]
async fn test_multi_send_without_funds_fails_with_nonzero_code() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);

    let inputs = vec![SendEntry {
        address: client.address().to_string(),
        coins: vec![Coin::new(DENOM, 100)],
    }];
    let outputs = vec![SendEntry {
        address: "frt1nobody".to_string(),
        coins: vec![Coin::new(DENOM, 100)],
    }];

    let tx = client.multi_send(&inputs, &outputs, 200_000).await.unwrap();
    assert!(!tx.is_success());
    assert!(tx.raw_log.contains("insufficient funds"));
}

#[tokio::test]
async fn test_balance_query_reflects_ledger() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    chain.fund(client.address(), DENOM, 42_000_000);

    let coin = client.balance(client.address(), DENOM).await.unwrap();
    assert_eq!(coin.amount.u128(), 42_000_000);
    assert_eq!(coin.denom, DENOM);
}

// ==================== Execute & query ====================

#[tokio::test]
async fn test_execute_attaches_funds_to_the_contract() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    chain.fund(client.address(), DENOM, 1_000);

    let (code_id, code_hash) = upload(&client, b"ftoken").await;
    let tx = client
        .instantiate(code_id, &code_hash, &json!({}), "exec target", 1_000_000)
        .await
        .unwrap();
    let contract = Contract {
        address: tx.find_attribute("contract_address").unwrap().to_string(),
        code_hash,
    };

    let tx = client
        .execute(&contract, &json!({"bid": {"amount": "500"}}), &[Coin::new(DENOM, 500)], 200_000)
        .await
        .unwrap();
    assert!(tx.is_success());
    assert!(tx.gas_used > 0);
    assert_eq!(chain.balance_of(&contract.address, DENOM), 500);
    assert_eq!(chain.balance_of(client.address(), DENOM), 500);
}

#[tokio::test]
async fn test_query_decodes_canned_response() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    let (code_id, code_hash) = upload(&client, b"fractionalizer").await;
    let tx = client
        .instantiate(code_id, &code_hash, &json!({}), "query target", 1_000_000)
        .await
        .unwrap();
    let contract = Contract {
        address: tx.find_attribute("contract_address").unwrap().to_string(),
        code_hash,
    };
    chain.set_query_response(&contract.address, json!({"count": ["frt1ftoken0"]}));

    let response: FracCountResponse = client
        .query(&contract, &FracQueryMsg::GetCount {})
        .await
        .unwrap();
    assert_eq!(response.count, vec!["frt1ftoken0".to_string()]);
}

#[tokio::test]
async fn test_query_error_envelope_surfaces_as_contract_error() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    let (code_id, code_hash) = upload(&client, b"fractionalizer").await;
    let tx = client
        .instantiate(code_id, &code_hash, &json!({}), "erroring", 1_000_000)
        .await
        .unwrap();
    let contract = Contract {
        address: tx.find_attribute("contract_address").unwrap().to_string(),
        code_hash,
    };
    // No canned response registered: the mock answers with a parse_err
    // envelope, which must surface structurally.
    let result: Result<FracCountResponse, _> =
        client.query(&contract, &FracQueryMsg::GetCount {}).await;
    assert!(matches!(result, Err(ClientError::Contract(_))));
}

#[tokio::test]
async fn test_legit_payload_containing_error_marker_is_not_an_error() {
    let chain = Arc::new(MockChain::new());
    let client = client_on(&chain);
    let (code_id, code_hash) = upload(&client, b"fractionalizer").await;
    let tx = client
        .instantiate(code_id, &code_hash, &json!({}), "marker", 1_000_000)
        .await
        .unwrap();
    let contract = Contract {
        address: tx.find_attribute("contract_address").unwrap().to_string(),
        code_hash,
    };
    chain.set_query_response(
        &contract.address,
        json!({"count": ["frt1parse_err\"lookalike"]}),
    );

    let response: FracCountResponse = client
        .query(&contract, &FracQueryMsg::GetCount {})
        .await
        .unwrap();
    assert_eq!(response.count.len(), 1);
}
