//! # fsnft-client
//!
//! Chain client for the fsnft integration harness.
//!
//! ## Features
//!
//! - **ChainClient**: broadcast-and-poll transaction submission plus
//!   compute (store/instantiate/execute/query) and bank endpoints
//! - **Wallet**: mnemonic-backed key handling and signing
//! - **Transport**: object-safe transport trait with an HTTP gateway
//!   implementation and an in-process mock devnet for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fsnft_client::{ChainClient, MockChain, SignMode, Wallet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let chain = Arc::new(MockChain::new());
//!     let wallet = Wallet::new_random(SignMode::Amino)?;
//!     println!("address: {}", wallet.address());
//!
//!     let client = ChainClient::with_transport(chain, "fsnft-dev-1", wallet);
//!     let tx = client.store_code(b"\x00wasm", 5_000_000).await?;
//!     println!("stored with code {}", tx.code);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod error;
mod mock;
mod transport;
pub mod types;
mod wallet;

pub use client::{ChainClient, ClientOptions};
pub use error::ClientError;
pub use mock::MockChain;
pub use transport::Transport;
pub use wallet::{SignMode, Wallet};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

pub use types::{Coin, Contract, LogEntry, SendEntry, TxResponse, UploadedCode};
