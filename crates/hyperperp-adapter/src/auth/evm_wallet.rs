/*
[INPUT]:  EVM private key (hex string) or fresh entropy
[OUTPUT]: Recoverable signatures and the wallet address
[POS]:    Auth layer - local EVM key implementation
[UPDATE]: When signing logic or key handling changes
*/

use std::str::FromStr;

use alloy_primitives::{Address, B256, Signature};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::auth::WalletSigner;
use crate::http::{HyperliquidError, Result};

/// Locally held secp256k1 signer.
///
/// Used both for the user's primary wallet (when a raw key is supplied, e.g.
/// by the CLI) and for freshly generated agent keys.
#[derive(Debug, Clone)]
pub struct EvmWalletSigner {
    signer: PrivateKeySigner,
    chain_id: u64,
}

impl EvmWalletSigner {
    /// Create a signer from a hex-encoded private key.
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn from_hex(private_key_hex: &str, chain_id: u64) -> Result<Self> {
        let private_key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| HyperliquidError::Config(format!("Invalid EVM private key: {}", e)))?;

        Ok(Self { signer, chain_id })
    }

    /// Generate a new cryptographically random key pair
    pub fn random(chain_id: u64) -> Self {
        Self {
            signer: PrivateKeySigner::random(),
            chain_id,
        }
    }

    /// Raw secret key bytes, for session-scoped persistence
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.signer.to_bytes().into()
    }
}

#[async_trait]
impl WalletSigner for EvmWalletSigner {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_hash(&self, hash: B256) -> Result<Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| HyperliquidError::Signing(format!("Failed to sign hash: {}", e)))
    }
}
