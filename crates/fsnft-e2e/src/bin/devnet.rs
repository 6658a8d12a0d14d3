//! Devnet test driver
//!
//! Connects to the local gateway, provisions a fresh environment and runs
//! the scenario suite sequentially. Exits non-zero on the first failure.

use std::process::ExitCode;
use std::sync::Arc;

use fsnft_client::{HttpTransport, Transport};
use fsnft_e2e::{run_test, scenarios, E2eResult, HarnessConfig, TestEnv};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("test run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> E2eResult<()> {
    let config = HarnessConfig::from_env()?;
    info!(url = %config.grpc_web_url, chain_id = %config.chain_id, "connecting to devnet");

    let transport = Arc::new(HttpTransport::new(&config.grpc_web_url)) as Arc<dyn Transport>;
    let env = TestEnv::setup(transport, &config).await?;

    run_test("sanity", scenarios::sanity(&env, &config)).await?;

    info!("all tests completed successfully");
    Ok(())
}
