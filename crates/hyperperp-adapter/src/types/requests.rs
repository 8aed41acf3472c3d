/*
[INPUT]:  Order parameters, agent approvals, and info query shapes
[OUTPUT]: Serializable request bodies for /info and /exchange
[POS]:    Data layer - request type definitions
[UPDATE]: When adding new actions or changing wire field names
*/

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::types::enums::{Grouping, TimeInForce};

/// Typed request bodies for the `/info` endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    AllMids,
    Meta,
    MarginTable {
        id: u32,
    },
    #[serde(rename_all = "camelCase")]
    PreTransferCheck {
        user: String,
        source: String,
    },
}

/// 128-bit client order id, hex-encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cloid([u8; 16]);

impl Cloid {
    pub fn random() -> Self {
        Self(*Uuid::new_v4().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for Cloid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Cloid {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Cloid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cloid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Order placement type; only limit orders carry a time-in-force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit { tif: TimeInForce },
}

/// One order in a batch, using the exchange's single-letter wire keys.
///
/// Field order matters: L1 action hashing runs over the msgpack encoding
/// of this struct, which follows declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "a")]
    pub asset: u32,
    #[serde(rename = "b")]
    pub is_buy: bool,
    #[serde(rename = "p", with = "rust_decimal::serde::str")]
    pub limit_px: Decimal,
    #[serde(rename = "s", with = "rust_decimal::serde::str")]
    pub sz: Decimal,
    #[serde(rename = "r")]
    pub reduce_only: bool,
    #[serde(rename = "t")]
    pub order_type: OrderType,
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub cloid: Option<Cloid>,
}

/// Actions signed by the key bound to the exchange client (agent or user)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum L1Action {
    Order {
        orders: Vec<OrderRequest>,
        grouping: Grouping,
    },
    #[serde(rename_all = "camelCase")]
    UpdateLeverage {
        asset: u32,
        is_cross: bool,
        leverage: u32,
    },
}

/// Actions signed directly by a wallet via EIP-712 typed data.
///
/// The `nonce`/`time` field must equal the envelope nonce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UserAction {
    #[serde(rename_all = "camelCase")]
    ApproveAgent {
        hyperliquid_chain: String,
        signature_chain_id: String,
        agent_address: String,
        agent_name: String,
        nonce: u64,
    },
    #[serde(rename_all = "camelCase")]
    UsdSend {
        hyperliquid_chain: String,
        signature_chain_id: String,
        destination: String,
        #[serde(with = "rust_decimal::serde::str")]
        amount: Decimal,
        time: u64,
    },
}

/// Signature in the exchange's r/s/v wire encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSignature {
    pub r: String,
    pub s: String,
    pub v: u8,
}

impl From<alloy_primitives::Signature> for WireSignature {
    fn from(sig: alloy_primitives::Signature) -> Self {
        Self {
            r: format!("0x{:064x}", sig.r()),
            s: format!("0x{:064x}", sig.s()),
            v: 27 + sig.v() as u8,
        }
    }
}

/// Envelope posted to `/exchange`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePayload<A: Serialize> {
    pub action: A,
    pub nonce: u64,
    pub signature: WireSignature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_info_request_serialization() {
        assert_eq!(
            serde_json::to_value(&InfoRequest::AllMids).unwrap(),
            json!({"type": "allMids"})
        );
        assert_eq!(
            serde_json::to_value(&InfoRequest::MarginTable { id: 3 }).unwrap(),
            json!({"type": "marginTable", "id": 3})
        );
        assert_eq!(
            serde_json::to_value(&InfoRequest::PreTransferCheck {
                user: "0xabc".to_string(),
                source: "0x222".to_string(),
            })
            .unwrap(),
            json!({"type": "preTransferCheck", "user": "0xabc", "source": "0x222"})
        );
    }

    #[test]
    fn test_order_wire_keys() {
        let order = OrderRequest {
            asset: 0,
            is_buy: true,
            limit_px: dec!(0.02),
            sz: dec!(1),
            reduce_only: false,
            order_type: OrderType::Limit {
                tif: TimeInForce::Gtc,
            },
            cloid: None,
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "a": 0,
                "b": true,
                "p": "0.02",
                "s": "1",
                "r": false,
                "t": {"limit": {"tif": "Gtc"}}
            })
        );
    }

    #[test]
    fn test_order_action_tag() {
        let action = L1Action::UpdateLeverage {
            asset: 0,
            is_cross: true,
            leverage: 5,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"type": "updateLeverage", "asset": 0, "isCross": true, "leverage": 5})
        );
    }

    #[test]
    fn test_usd_send_amount_as_string() {
        let action = UserAction::UsdSend {
            hyperliquid_chain: "Testnet".to_string(),
            signature_chain_id: "0x3e6".to_string(),
            destination: "0x1234".to_string(),
            amount: dec!(10),
            time: 1_700_000_000_000,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["amount"], json!("10"));
        assert_eq!(value["type"], json!("usdSend"));
    }

    #[test]
    fn test_cloid_roundtrip() {
        let cloid = Cloid::random();
        let encoded = cloid.to_string();
        assert!(encoded.starts_with("0x"));
        assert_eq!(encoded.len(), 34);
        let parsed: Cloid = encoded.parse().unwrap();
        assert_eq!(parsed, cloid);
    }
}
