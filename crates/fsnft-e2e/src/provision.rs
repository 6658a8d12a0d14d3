//! Account provisioning
//!
//! Generates fresh mnemonic-backed accounts and funds all of them with a
//! single multi-output bank transfer from the first genesis account.

use std::sync::Arc;

use fsnft_client::{ChainClient, ClientOptions, Coin, SendEntry, SignMode, Transport, Wallet};
use fsnft_types::HumanAddr;
use tracing::{error, info};

use crate::{E2eError, E2eResult, HarnessConfig};

/// A provisioned test account
///
/// Carries one wallet handle per signing mode plus a client whose signer is
/// the Amino handle. All three are derived from the same mnemonic, so they
/// share one address.
pub struct Account {
    /// The account's address
    pub address: HumanAddr,
    /// Seed phrase the wallets were derived from
    pub mnemonic: String,
    /// Amino-mode wallet handle
    pub wallet_amino: Wallet,
    /// Direct-mode wallet handle
    pub wallet_proto: Wallet,
    /// Client signing as this account
    pub client: ChainClient,
}

impl Account {
    /// Build an account from a fresh random mnemonic
    pub fn new_random(
        transport: Arc<dyn Transport>,
        chain_id: &str,
        options: ClientOptions,
    ) -> E2eResult<Self> {
        let wallet = Wallet::new_random(SignMode::Amino)?;
        let mnemonic = wallet.mnemonic().to_string();
        Self::assemble(transport, chain_id, wallet, mnemonic, options)
    }

    /// Restore an account from an existing mnemonic
    pub fn from_mnemonic(
        transport: Arc<dyn Transport>,
        chain_id: &str,
        mnemonic: &str,
        options: ClientOptions,
    ) -> E2eResult<Self> {
        let wallet = Wallet::from_mnemonic(mnemonic, SignMode::Amino)?;
        Self::assemble(transport, chain_id, wallet, mnemonic.to_string(), options)
    }

    fn assemble(
        transport: Arc<dyn Transport>,
        chain_id: &str,
        wallet_amino: Wallet,
        mnemonic: String,
        options: ClientOptions,
    ) -> E2eResult<Self> {
        let wallet_proto = Wallet::from_mnemonic(&mnemonic, SignMode::Direct)?;
        let signer = Wallet::from_mnemonic(&mnemonic, SignMode::Amino)?;
        let address = wallet_amino.address().clone();
        let client =
            ChainClient::with_transport(transport, chain_id, signer).with_options(options);
        Ok(Self {
            address,
            mnemonic,
            wallet_amino,
            wallet_proto,
            client,
        })
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Generate `new_accounts + 1` fresh accounts on the given transport
pub fn gen_new_accounts(
    transport: &Arc<dyn Transport>,
    config: &HarnessConfig,
) -> E2eResult<Vec<Account>> {
    let total = config.new_accounts + 1;
    let mut accounts = Vec::with_capacity(total);
    for i in 0..total {
        let account = Account::new_random(
            Arc::clone(transport),
            &config.chain_id,
            config.client_options(),
        )?;
        info!(index = i, address = %account.address, "generated account");
        accounts.push(account);
    }
    Ok(accounts)
}

/// Bind the genesis accounts named in the configuration
pub fn genesis_accounts(
    transport: &Arc<dyn Transport>,
    config: &HarnessConfig,
) -> E2eResult<Vec<Account>> {
    config
        .genesis_mnemonics
        .iter()
        .map(|m| {
            Account::from_mnemonic(
                Arc::clone(transport),
                &config.chain_id,
                m,
                config.client_options(),
            )
        })
        .collect()
}

/// Fund every account with `funding_amount` base units in one multi-send
/// paid by the first genesis account
pub async fn fund_from_genesis(
    genesis: &Account,
    accounts: &[Account],
    config: &HarnessConfig,
) -> E2eResult<()> {
    let total = config
        .funding_amount
        .checked_mul(accounts.len() as u128)
        .ok_or_else(|| E2eError::Setup("funding amount overflows".to_string()))?;

    let inputs = vec![SendEntry {
        address: genesis.address.clone(),
        coins: vec![Coin::new(&config.denom, total)],
    }];
    let outputs: Vec<SendEntry> = accounts
        .iter()
        .map(|account| SendEntry {
            address: account.address.clone(),
            coins: vec![Coin::new(&config.denom, config.funding_amount)],
        })
        .collect();

    let tx = genesis
        .client
        .multi_send(&inputs, &outputs, config.send_gas)
        .await?;
    if !tx.is_success() {
        error!(code = tx.code, raw_log = %tx.raw_log, "funding transfer rejected");
        return Err(E2eError::Tx {
            code: tx.code,
            raw_log: tx.raw_log,
        });
    }
    info!(
        accounts = accounts.len(),
        amount = config.funding_amount,
        "funded accounts from genesis"
    );
    Ok(())
}

/// Query the native-token balance of an account
pub async fn native_balance(account: &Account, denom: &str) -> E2eResult<u128> {
    let coin = account.client.balance(&account.address, denom).await?;
    Ok(coin.amount.u128())
}

/// Generate and fund the fresh accounts for a run
pub async fn provision(
    transport: &Arc<dyn Transport>,
    config: &HarnessConfig,
) -> E2eResult<Vec<Account>> {
    let genesis = genesis_accounts(transport, config)?;
    let payer = genesis
        .first()
        .ok_or_else(|| E2eError::Setup("no genesis account configured".to_string()))?;
    let accounts = gen_new_accounts(transport, config)?;
    fund_from_genesis(payer, &accounts, config).await?;
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsnft_client::MockChain;
    use std::time::Duration;

    fn mock_transport() -> Arc<dyn Transport> {
        Arc::new(MockChain::new()) as Arc<dyn Transport>
    }

    #[test]
    fn test_account_handles_share_one_address() {
        let config = HarnessConfig::default();
        let account = Account::from_mnemonic(
            mock_transport(),
            &config.chain_id,
            &config.genesis_mnemonics[0],
            config.client_options(),
        )
        .unwrap();
        assert_eq!(account.wallet_amino.address(), account.wallet_proto.address());
        assert_eq!(&account.address, account.wallet_amino.address());
        assert_eq!(account.client.address(), account.address);
    }

    #[test]
    fn test_configured_poll_interval_reaches_the_client() {
        let mut config = HarnessConfig::default();
        config.poll_interval = Duration::from_millis(250);
        let account =
            Account::new_random(mock_transport(), &config.chain_id, config.client_options())
                .unwrap();
        assert_eq!(
            account.client.options().poll_interval,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_gen_creates_one_more_than_requested() {
        let mut config = HarnessConfig::default();
        config.new_accounts = 2;
        let accounts = gen_new_accounts(&mock_transport(), &config).unwrap();
        assert_eq!(accounts.len(), 3);
        // All addresses distinct
        let mut addresses: Vec<_> = accounts.iter().map(|a| a.address.clone()).collect();
        addresses.sort();
        addresses.dedup();
        assert_eq!(addresses.len(), 3);
    }
}
