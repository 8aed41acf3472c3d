/*
[INPUT]:  Wallet capability contracts and key material
[OUTPUT]: Signers usable by the exchange client
[POS]:    Auth layer - wallet signing abstraction
[UPDATE]: When adding new wallet types or changing signature format
*/

pub mod evm_wallet;
pub mod wallet;

pub use evm_wallet::EvmWalletSigner;
pub use wallet::{MockWalletSigner, WalletSigner};
