/*
[INPUT]:  Raw /exchange response JSON
[OUTPUT]: Typed response envelopes and per-order statuses
[POS]:    Data layer - response type definitions
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::requests::Cloid;

/// Top-level `/exchange` envelope: `ok` carries a typed payload,
/// `err` carries the raw exchange message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", content = "response", rename_all = "lowercase")]
pub enum ExchangeResponse {
    Ok(OkResponse),
    Err(String),
}

/// Payload of a successful `/exchange` call
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum OkResponse {
    /// Order placement payload with per-order statuses
    Order(OrderResponseData),
    /// Acknowledgement shape used by approvals, transfers, leverage updates
    Default,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderResponseData {
    pub statuses: Vec<OrderStatus>,
}

/// Terminal status of one submitted order
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Resting(RestingOrder),
    Filled(FilledOrder),
    Error(String),
}

impl OrderStatus {
    /// Order id when the order was accepted (resting or filled)
    pub fn oid(&self) -> Option<u64> {
        match self {
            OrderStatus::Resting(resting) => Some(resting.oid),
            OrderStatus::Filled(filled) => Some(filled.oid),
            OrderStatus::Error(_) => None,
        }
    }
}

/// Order accepted onto the book, not yet matched
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RestingOrder {
    pub oid: u64,
    #[serde(default)]
    pub cloid: Option<Cloid>,
}

/// Order matched immediately on arrival
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilledOrder {
    pub oid: u64,
    pub total_sz: Decimal,
    pub avg_px: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloid: Option<Cloid>,
}
