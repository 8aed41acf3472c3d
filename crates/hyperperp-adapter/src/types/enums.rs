/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Account-existence checks pass this as the funding source tag.
pub const PRE_TRANSFER_SOURCE: &str = "0x2222222222222222222222222222222222222222";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn is_buy(self) -> bool {
        matches!(self, Side::Buy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    Gtc,
    Ioc,
    Alo,
}

/// Order grouping mode for batch order submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grouping {
    #[serde(rename = "na")]
    Na,
    #[serde(rename = "normalTpsl")]
    NormalTpsl,
    #[serde(rename = "positionTpsl")]
    PositionTpsl,
}

/// HyperEVM network the exchange API is keyed to.
///
/// Chain ids are the HyperEVM ids (998 testnet, 999 mainnet); any other
/// chain id is unsupported and `from_chain_id` returns `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Mainnet,
}

impl Network {
    pub const fn chain_id(self) -> u64 {
        match self {
            Network::Testnet => 998,
            Network::Mainnet => 999,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            998 => Some(Network::Testnet),
            999 => Some(Network::Mainnet),
            _ => None,
        }
    }

    pub const fn api_base_url(self) -> &'static str {
        match self {
            Network::Testnet => "https://api.hyperliquid-testnet.xyz",
            Network::Mainnet => "https://api.hyperliquid.xyz",
        }
    }

    /// Explorer link for a confirmed order id
    pub fn explorer_tx_url(self, oid: u64) -> String {
        match self {
            Network::Testnet => format!("https://app.hyperliquid-testnet.xyz/explorer/tx/{oid}"),
            Network::Mainnet => format!("https://app.hyperliquid.xyz/explorer/tx/{oid}"),
        }
    }

    /// `hyperliquidChain` field value for user-signed actions
    pub const fn hyperliquid_chain(self) -> &'static str {
        match self {
            Network::Testnet => "Testnet",
            Network::Mainnet => "Mainnet",
        }
    }

    /// Phantom-agent source tag used when hashing L1 actions
    pub const fn agent_source(self) -> &'static str {
        match self {
            Network::Testnet => "b",
            Network::Mainnet => "a",
        }
    }

    /// Hex-encoded chain id carried in user-signed action payloads
    pub fn signature_chain_id_hex(self) -> String {
        format!("{:#x}", self.chain_id())
    }
}
