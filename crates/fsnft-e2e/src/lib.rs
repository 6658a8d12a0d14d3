//! # fsnft-e2e
//!
//! Integration-test harness for the fractionalizer and ftoken contracts.
//!
//! The harness provisions fresh accounts, funds them from a genesis
//! account, uploads the two contract bytecodes, instantiates the
//! fractionalizer, and runs scenario checks against the resulting
//! environment. All chain interaction goes through
//! [`fsnft_client::ChainClient`]; in hermetic tests the client binds an
//! in-process [`fsnft_client::MockChain`], while the `devnet` binary binds
//! the local gateway.
//!
//! ## Design
//!
//! 1. **Linear**: setup completes fully before any scenario runs; there is
//!    no retry and no concurrency between steps
//! 2. **Isolated**: every cargo test provisions its own environment on its
//!    own mock chain
//! 3. **Fatal errors**: any rejected transaction, malformed chain response
//!    or contract-level query error aborts the run

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod env;
pub mod provision;
pub mod runner;
pub mod scenarios;

pub use config::HarnessConfig;
pub use env::TestEnv;
pub use provision::Account;
pub use runner::run_test;

use fsnft_client::ClientError;

/// Harness result
pub type E2eResult<T> = Result<T, E2eError>;

/// Harness errors; every variant is fatal to the run
#[derive(Debug, thiserror::Error)]
pub enum E2eError {
    /// Setup or configuration failed
    #[error("setup failed: {0}")]
    Setup(String),

    /// A broadcast transaction was rejected by the chain
    #[error("transaction failed with code {code}: {raw_log}")]
    Tx {
        /// Chain status code
        code: u32,
        /// Raw log carrying the failure reason
        raw_log: String,
    },

    /// Transport, signing or contract-query failure in the client
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The chain response lacked an expected event attribute; a harness
    /// bug or node incompatibility, never retried
    #[error("malformed chain response: {0}")]
    MalformedResponse(String),

    /// Reading contract bytecode from disk failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario check failed
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// Scenario exists in the suite but has no body yet
    #[error("scenario not implemented: {0}")]
    Unimplemented(&'static str),
}
