//! Harness configuration
//!
//! Endpoint, chain id, funding seeds and amounts are injected
//! configuration, not literals at call sites. Defaults target the local
//! devnet; every field can be overridden through `FSNFT_*` environment
//! variables.

use std::path::PathBuf;
use std::time::Duration;

use fsnft_client::ClientOptions;

use crate::{E2eError, E2eResult};

/// Well-known genesis seed phrases of the local devnet
const DEVNET_GENESIS_MNEMONICS: [&str; 4] = [
    "grant rice replace explain federal release fix clever romance raise often wild taxi \
     quarter soccer fiber love must tape steak together observe swap guitar",
    "jelly shadow frog dirt dragon use armed praise universe win jungle close inmate rain \
     oil canvas beauty pioneer chef soccer icon dizzy thunder meadow",
    "chair love bleak wonder skirt permit say assist aunt credit roast size obtain minute \
     throw sand usual age smart exact enough room shadow charge",
    "word twist toast cloth movie predict advance crumble escape whale sail such angry \
     muffin balcony keen move employ cook valve hurt glimpse breeze brick",
];

/// Harness configuration
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Gateway URL of the devnet
    pub grpc_web_url: String,
    /// Chain identifier
    pub chain_id: String,
    /// Native-token denomination
    pub denom: String,
    /// Number of extra accounts beyond the first; provisioning creates
    /// `new_accounts + 1` in total
    pub new_accounts: usize,
    /// Amount of base units sent to each fresh account
    pub funding_amount: u128,
    /// Seed phrases of the pre-funded genesis accounts; the first one pays
    pub genesis_mnemonics: Vec<String>,
    /// Path to the compiled fractionalizer bytecode
    pub fractionalizer_wasm: PathBuf,
    /// Path to the compiled ftoken bytecode
    pub ftoken_wasm: PathBuf,
    /// Gas limit for store-code transactions
    pub store_gas: u64,
    /// Gas limit for instantiate transactions
    pub init_gas: u64,
    /// Gas limit for execute transactions
    pub exec_gas: u64,
    /// Gas limit for bank transfers
    pub send_gas: u64,
    /// Interval between inclusion polls
    pub poll_interval: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            grpc_web_url: "http://localhost:9091".to_string(),
            chain_id: "fsnft-dev-1".to_string(),
            denom: "ufrt".to_string(),
            new_accounts: 3,
            funding_amount: 100_000 * 1_000_000,
            genesis_mnemonics: DEVNET_GENESIS_MNEMONICS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            fractionalizer_wasm: PathBuf::from("fractionalizer.wasm.gz"),
            ftoken_wasm: PathBuf::from("ftoken.wasm.gz"),
            store_gas: 5_000_000,
            init_gas: 1_000_000,
            exec_gas: 200_000,
            send_gas: 200_000,
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl HarnessConfig {
    /// Build the configuration from the process environment, falling back
    /// to devnet defaults for unset variables
    pub fn from_env() -> E2eResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Client tuning derived from this configuration; every account's
    /// client is built with these options
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            poll_interval: self.poll_interval,
            ..ClientOptions::default()
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> E2eResult<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("FSNFT_GRPC_WEB_URL") {
            config.grpc_web_url = url;
        }
        if let Some(chain_id) = lookup("FSNFT_CHAIN_ID") {
            config.chain_id = chain_id;
        }
        if let Some(denom) = lookup("FSNFT_DENOM") {
            config.denom = denom;
        }
        if let Some(n) = lookup("FSNFT_NEW_ACCOUNTS") {
            config.new_accounts = parse(&n, "FSNFT_NEW_ACCOUNTS")?;
        }
        if let Some(amount) = lookup("FSNFT_FUNDING_AMOUNT") {
            config.funding_amount = parse(&amount, "FSNFT_FUNDING_AMOUNT")?;
        }
        if let Some(mnemonics) = lookup("FSNFT_GENESIS_MNEMONICS") {
            config.genesis_mnemonics = mnemonics
                .split(';')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect();
            if config.genesis_mnemonics.is_empty() {
                return Err(E2eError::Setup(
                    "FSNFT_GENESIS_MNEMONICS must list at least one phrase".to_string(),
                ));
            }
        }
        if let Some(path) = lookup("FSNFT_FRACTIONALIZER_WASM") {
            config.fractionalizer_wasm = PathBuf::from(path);
        }
        if let Some(path) = lookup("FSNFT_FTOKEN_WASM") {
            config.ftoken_wasm = PathBuf::from(path);
        }
        if let Some(ms) = lookup("FSNFT_POLL_INTERVAL_MS") {
            config.poll_interval = Duration::from_millis(parse(&ms, "FSNFT_POLL_INTERVAL_MS")?);
        }

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(value: &str, key: &str) -> E2eResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| E2eError::Setup(format!("invalid {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_the_local_devnet() {
        let config = HarnessConfig::default();
        assert_eq!(config.grpc_web_url, "http://localhost:9091");
        assert_eq!(config.funding_amount, 100_000_000_000);
        assert_eq!(config.genesis_mnemonics.len(), 4);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_lookup_overrides_selected_fields() {
        let config = HarnessConfig::from_lookup(|key| match key {
            "FSNFT_CHAIN_ID" => Some("fsnft-ci-7".to_string()),
            "FSNFT_NEW_ACCOUNTS" => Some("5".to_string()),
            "FSNFT_GENESIS_MNEMONICS" => Some("alpha phrase; beta phrase".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.chain_id, "fsnft-ci-7");
        assert_eq!(config.new_accounts, 5);
        assert_eq!(config.genesis_mnemonics, vec!["alpha phrase", "beta phrase"]);
        // Untouched fields keep their defaults
        assert_eq!(config.denom, "ufrt");
    }

    #[test]
    fn test_malformed_numeric_override_is_a_setup_error() {
        let result = HarnessConfig::from_lookup(|key| {
            (key == "FSNFT_FUNDING_AMOUNT").then(|| "lots".to_string())
        });
        assert!(matches!(result, Err(E2eError::Setup(_))));
    }

    #[test]
    fn test_poll_interval_override_flows_into_client_options() {
        let config = HarnessConfig::from_lookup(|key| {
            (key == "FSNFT_POLL_INTERVAL_MS").then(|| "250".to_string())
        })
        .unwrap();
        assert_eq!(
            config.client_options().poll_interval,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_empty_mnemonic_list_is_rejected() {
        let result = HarnessConfig::from_lookup(|key| {
            (key == "FSNFT_GENESIS_MNEMONICS").then(|| " ; ".to_string())
        });
        assert!(matches!(result, Err(E2eError::Setup(_))));
    }
}
