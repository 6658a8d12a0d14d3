//! Scenario checks run against a prepared [`TestEnv`]
//!
//! Scenarios take a shared reference to the environment and never mutate
//! harness state; all chain effects go through the accounts' clients.

use fsnft_client::Coin;
use tracing::info;

use crate::env::TestEnv;
use crate::{E2eError, E2eResult, HarnessConfig};

/// Verify the environment is usable: accounts exist and hold funds, both
/// codes are uploaded and the fractionalizer answers on chain
pub async fn sanity(env: &TestEnv, config: &HarnessConfig) -> E2eResult<()> {
    if env.accounts.len() != config.new_accounts + 1 {
        return Err(E2eError::Assertion(format!(
            "expected {} accounts, found {}",
            config.new_accounts + 1,
            env.accounts.len()
        )));
    }
    if env.uploaded_codes.len() != 2 {
        return Err(E2eError::Assertion(format!(
            "expected 2 uploaded codes, found {}",
            env.uploaded_codes.len()
        )));
    }
    if env.uploaded_codes[0].code_id == env.uploaded_codes[1].code_id {
        return Err(E2eError::Assertion(
            "fractionalizer and ftoken share a code id".to_string(),
        ));
    }
    if !env.fractionalizer().address.starts_with("frt1") {
        return Err(E2eError::Assertion(format!(
            "fractionalizer address looks wrong: {}",
            env.fractionalizer().address
        )));
    }

    let operator = &env.accounts[0];
    let Coin { amount, .. } = operator
        .client
        .balance(&operator.address, &config.denom)
        .await?;
    if amount.u128() == 0 {
        return Err(E2eError::Assertion(format!(
            "operator {} holds no {}",
            operator.address, config.denom
        )));
    }
    info!(operator = %operator.address, balance = amount.u128(), "environment sane");
    Ok(())
}

/// Deposit an nft into the fractionalizer and check the resulting ftoken
/// instance
///
/// Requires an nft contract on the chain, which the harness does not
/// deploy yet.
pub async fn exec_fractionalize(_env: &TestEnv, _config: &HarnessConfig) -> E2eResult<()> {
    Err(E2eError::Unimplemented("exec_fractionalize"))
}

/// Query the fractionalizer's registry of created ftoken instances
///
/// Depends on [`exec_fractionalize`] having created at least one instance.
pub async fn query_get_count(_env: &TestEnv, _config: &HarnessConfig) -> E2eResult<()> {
    Err(E2eError::Unimplemented("query_get_count"))
}
