//! Transport layer for gateway communication

use async_trait::async_trait;
use serde_json::Value;

use crate::ClientError;

/// Object-safe transport trait
///
/// One method name plus positional JSON params in, JSON out. The mock
/// devnet and the HTTP gateway both sit behind this.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and get the JSON response
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError>;
}

/// Helper to deserialize a transport response
pub fn deserialize_response<T: serde::de::DeserializeOwned>(
    value: Value,
) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Serialization(e.to_string()))
}

/// HTTP transport talking to the local gateway
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport for the given gateway URL
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, ClientError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": method,
            "params": params,
        });

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let response: GatewayResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| ClientError::Rpc {
            code: -32603,
            message: "no result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct GatewayResponse {
    result: Option<Value>,
    error: Option<GatewayError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct GatewayError {
    code: i64,
    message: String,
}
