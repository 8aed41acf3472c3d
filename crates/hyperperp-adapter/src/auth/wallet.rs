/*
[INPUT]:  Hash to sign and wallet key material
[OUTPUT]: Secp256k1 signatures plus network/address queries
[POS]:    Auth layer - wallet integration abstraction
[UPDATE]: When adding new wallet types or changing signature format
*/

use alloy_primitives::{Address, B256, Signature};
use async_trait::async_trait;

use crate::http::Result;

/// Capability contract of a connected wallet.
///
/// This is the boundary to the wallet-authentication provider: the adapter
/// only needs the active network, the address, and hash signing. The trait
/// is async to support hardware wallets and external signers.
#[async_trait]
pub trait WalletSigner: Send + Sync + std::fmt::Debug {
    /// Chain id of the network the wallet is currently on
    fn chain_id(&self) -> u64;

    /// Get the wallet address
    fn address(&self) -> Address;

    /// Sign a 32-byte hash and return the recoverable signature
    async fn sign_hash(&self, hash: B256) -> Result<Signature>;
}

/// Wallet signer for tests: a throwaway key reporting an arbitrary chain id
#[derive(Debug, Clone)]
pub struct MockWalletSigner {
    inner: crate::auth::EvmWalletSigner,
    chain_id: u64,
}

impl MockWalletSigner {
    /// Create a mock signer on the given chain id with a random key
    pub fn new(chain_id: u64) -> Self {
        Self {
            inner: crate::auth::EvmWalletSigner::random(chain_id),
            chain_id,
        }
    }

    pub fn address(&self) -> Address {
        WalletSigner::address(&self.inner)
    }
}

#[async_trait]
impl WalletSigner for MockWalletSigner {
    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn address(&self) -> Address {
        WalletSigner::address(&self.inner)
    }

    async fn sign_hash(&self, hash: B256) -> Result<Signature> {
        self.inner.sign_hash(hash).await
    }
}
