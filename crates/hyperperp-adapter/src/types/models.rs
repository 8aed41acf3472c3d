/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for info endpoint data
[POS]:    Data layer - perpetuals metadata, margin tiers, account state
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One instrument in the published perpetuals universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    pub name: String,
    pub sz_decimals: u32,
    #[serde(default)]
    pub max_leverage: u32,
    #[serde(default)]
    pub only_isolated: bool,
}

/// Instrument universe returned by the `meta` info query.
///
/// Asset indices used by trading actions are positions in `universe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpsMeta {
    pub universe: Vec<AssetMeta>,
}

impl PerpsMeta {
    /// Position of a coin in the universe by exact name match
    pub fn asset_index(&self, coin: &str) -> Option<u32> {
        self.universe
            .iter()
            .position(|asset| asset.name == coin)
            .map(|idx| idx as u32)
    }
}

/// One leverage tier of a margin table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginTier {
    pub lower_bound: Decimal,
    pub max_leverage: u32,
}

/// Margin tier table keyed by instrument index.
///
/// The first tier carries the instrument's maximum leverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginTable {
    #[serde(default)]
    pub description: String,
    pub margin_tiers: Vec<MarginTier>,
}

/// Ledger-side account state for an address, observed via polling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreTransferCheck {
    #[serde(default)]
    pub fee: Decimal,
    #[serde(default)]
    pub is_sanctioned: bool,
    pub user_exists: bool,
    #[serde(default)]
    pub user_has_sent_tx: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_index_lookup() {
        let meta = PerpsMeta {
            universe: vec![
                AssetMeta {
                    name: "HYPE".to_string(),
                    sz_decimals: 2,
                    max_leverage: 5,
                    only_isolated: false,
                },
                AssetMeta {
                    name: "BTC".to_string(),
                    sz_decimals: 5,
                    max_leverage: 50,
                    only_isolated: false,
                },
            ],
        };

        assert_eq!(meta.asset_index("HYPE"), Some(0));
        assert_eq!(meta.asset_index("BTC"), Some(1));
        assert_eq!(meta.asset_index("DOGE"), None);
        // exact match only, no prefix/suffix handling at this layer
        assert_eq!(meta.asset_index("HYPE-PERP"), None);
    }

    #[test]
    fn test_pre_transfer_check_deserialization() {
        let raw = r#"{
            "fee": "0.0",
            "isSanctioned": false,
            "userExists": true,
            "userHasSentTx": false
        }"#;
        let check: PreTransferCheck = serde_json::from_str(raw).unwrap();
        assert!(check.user_exists);
        assert!(!check.is_sanctioned);
    }

    #[test]
    fn test_margin_table_deserialization() {
        let raw = r#"{
            "description": "",
            "marginTiers": [
                {"lowerBound": "0.0", "maxLeverage": 50},
                {"lowerBound": "1000000.0", "maxLeverage": 25}
            ]
        }"#;
        let table: MarginTable = serde_json::from_str(raw).unwrap();
        assert_eq!(table.margin_tiers.len(), 2);
        assert_eq!(table.margin_tiers[0].max_leverage, 50);
    }
}
