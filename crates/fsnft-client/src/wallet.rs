//! Wallet and key management

use bip39::Mnemonic;
use fsnft_types::HumanAddr;
use k256::ecdsa::{signature::Signer, Signature, SigningKey};
use sha2::{Digest, Sha256};

use crate::ClientError;

/// Bech32-style prefix of devnet account addresses
pub const ADDRESS_PREFIX: &str = "frt1";

/// Signing scheme used when building the sign-doc for a transaction
///
/// The gateway accepts both; contract-bearing transactions require `Amino`
/// while plain bank transfers may use either. Harness accounts carry one
/// wallet handle per mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignMode {
    /// Canonical-JSON sign-doc
    Amino,
    /// Length-prefixed binary sign-doc
    Direct,
}

impl SignMode {
    /// Wire name of the mode, embedded in the transaction envelope
    pub fn as_str(&self) -> &'static str {
        match self {
            SignMode::Amino => "amino",
            SignMode::Direct => "direct",
        }
    }
}

/// Wallet holding a mnemonic-derived signing key
///
/// Note: Clone is intentionally not implemented to prevent accidental key
/// duplication. Use [`Wallet::from_mnemonic`] to create another handle over
/// the same phrase.
pub struct Wallet {
    mnemonic: String,
    signing_key: SigningKey,
    address: HumanAddr,
    mode: SignMode,
}

impl Wallet {
    /// Generate a wallet from a fresh 24-word mnemonic
    pub fn new_random(mode: SignMode) -> Result<Self, ClientError> {
        let mnemonic =
            Mnemonic::generate(24).map_err(|e| ClientError::Key(e.to_string()))?;
        Self::from_parsed(mnemonic, mode)
    }

    /// Restore a wallet from an existing mnemonic phrase
    pub fn from_mnemonic(phrase: &str, mode: SignMode) -> Result<Self, ClientError> {
        let mnemonic = phrase
            .parse::<Mnemonic>()
            .map_err(|e| ClientError::InvalidMnemonic(e.to_string()))?;
        Self::from_parsed(mnemonic, mode)
    }

    fn from_parsed(mnemonic: Mnemonic, mode: SignMode) -> Result<Self, ClientError> {
        let seed = mnemonic.to_seed("");
        let signing_key = SigningKey::from_slice(&seed[..32])
            .map_err(|e| ClientError::Key(e.to_string()))?;
        let address = derive_address(&signing_key);
        Ok(Self {
            mnemonic: mnemonic.to_string(),
            signing_key,
            address,
            mode,
        })
    }

    /// The wallet's address
    pub fn address(&self) -> &HumanAddr {
        &self.address
    }

    /// The mnemonic phrase this wallet was derived from
    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    /// The wallet's signing mode
    pub fn mode(&self) -> SignMode {
        self.mode
    }

    /// Compressed public key, hex-encoded
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_encoded_point(true).as_bytes())
    }

    /// Sign arbitrary bytes, returning the hex-encoded signature
    pub fn sign_bytes(&self, bytes: &[u8]) -> String {
        let signature: Signature = self.signing_key.sign(bytes);
        hex::encode(signature.to_bytes())
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Derive an address from a signing key: prefix + first 20 bytes of the
/// sha256 of the compressed public key, hex-encoded
fn derive_address(key: &SigningKey) -> HumanAddr {
    let compressed = key.verifying_key().to_encoded_point(true);
    let digest = Sha256::digest(compressed.as_bytes());
    format!("{}{}", ADDRESS_PREFIX, hex::encode(&digest[..20]))
}
