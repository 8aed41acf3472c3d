/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Hyperliquid adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod signing;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    EvmWalletSigner,
    MockWalletSigner,
    WalletSigner,
};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    ExchangeClient,
    HyperliquidError,
    InfoClient,
    Result,
};

// Re-export all types
pub use types::*;
