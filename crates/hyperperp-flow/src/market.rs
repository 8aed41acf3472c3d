/*
[INPUT]:  Pair strings like "HYPE-PERP" and info client queries
[OUTPUT]: Mid prices, instrument indices, and leverage limits
[POS]:    Core flow support - market data helpers
[UPDATE]: When pair naming or leverage lookup rules change
*/

use hyperperp_adapter::{HyperliquidError, InfoClient, PerpsMeta};
use rust_decimal::Decimal;
use tracing::warn;

/// Suffix appended to coin names to form UI pair identifiers
pub const PERP_SUFFIX: &str = "-PERP";

/// Leverage assumed when the margin table cannot be fetched
pub const DEFAULT_MAX_LEVERAGE: u32 = 50;

/// Coin symbol for a pair; pairs without the suffix pass through unchanged
pub fn coin_from_pair(pair: &str) -> &str {
    pair.strip_suffix(PERP_SUFFIX).unwrap_or(pair)
}

/// Instrument index for a pair by exact `<name>-PERP` match.
///
/// Bare coin names do not resolve; the UI always supplies suffixed pairs.
pub fn resolve_asset_index(meta: &PerpsMeta, pair: &str) -> Option<u32> {
    meta.universe
        .iter()
        .position(|asset| format!("{}{}", asset.name, PERP_SUFFIX) == pair)
        .map(|idx| idx as u32)
}

/// Latest mid price for a pair, `None` when the coin is not listed
pub async fn mid_price(
    info: &InfoClient,
    pair: &str,
) -> Result<Option<Decimal>, HyperliquidError> {
    let mids = info.all_mids().await?;
    Ok(mids.get(coin_from_pair(pair)).copied())
}

/// Maximum leverage for a pair from the first margin tier
pub async fn max_leverage(info: &InfoClient, pair: &str) -> Result<u32, HyperliquidError> {
    let meta = info.meta().await?;
    let asset = resolve_asset_index(&meta, pair)
        .ok_or_else(|| HyperliquidError::Config(format!("Coin not found for {pair}")))?;

    let table = info.margin_table(asset).await?;
    table
        .margin_tiers
        .first()
        .map(|tier| tier.max_leverage)
        .ok_or_else(|| {
            HyperliquidError::InvalidResponse(format!("empty margin table for asset {asset}"))
        })
}

/// `max_leverage` with the UI's fallback: any failure degrades to the default
pub async fn max_leverage_or_default(info: &InfoClient, pair: &str) -> u32 {
    match max_leverage(info, pair).await {
        Ok(leverage) => leverage,
        Err(err) => {
            warn!(pair, %err, "failed to fetch max leverage, using default");
            DEFAULT_MAX_LEVERAGE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperperp_adapter::AssetMeta;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_meta() -> PerpsMeta {
        PerpsMeta {
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
        }
    }

    #[test]
    fn test_coin_from_pair() {
        assert_eq!(coin_from_pair("HYPE-PERP"), "HYPE");
        assert_eq!(coin_from_pair("BTC-PERP"), "BTC");
        assert_eq!(coin_from_pair("HYPE"), "HYPE");
    }

    #[test]
    fn test_resolve_asset_index_exact_suffix_match() {
        let meta = sample_meta();
        assert_eq!(resolve_asset_index(&meta, "HYPE-PERP"), Some(0));
        assert_eq!(resolve_asset_index(&meta, "BTC-PERP"), Some(1));
        // bare coin names and unknown pairs do not resolve
        assert_eq!(resolve_asset_index(&meta, "HYPE"), None);
        assert_eq!(resolve_asset_index(&meta, "DOGE-PERP"), None);
    }

    #[tokio::test]
    async fn test_mid_price_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/info"))
            .and(body_partial_json(json!({"type": "allMids"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"HYPE": "25.35"})),
            )
            .mount(&server)
            .await;

        let info = InfoClient::with_base_url(&server.uri()).unwrap();
        assert_eq!(mid_price(&info, "HYPE-PERP").await.unwrap(), Some(dec!(25.35)));
        assert_eq!(mid_price(&info, "DOGE-PERP").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_max_leverage_from_first_tier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/info"))
            .and(body_partial_json(json!({"type": "meta"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "universe": [{"name": "HYPE", "szDecimals": 2, "maxLeverage": 5}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/info"))
            .and(body_partial_json(json!({"type": "marginTable", "id": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "description": "",
                "marginTiers": [
                    {"lowerBound": "0.0", "maxLeverage": 5},
                    {"lowerBound": "100000.0", "maxLeverage": 3}
                ]
            })))
            .mount(&server)
            .await;

        let info = InfoClient::with_base_url(&server.uri()).unwrap();
        assert_eq!(max_leverage(&info, "HYPE-PERP").await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_max_leverage_default_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/info"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let info = InfoClient::with_base_url(&server.uri()).unwrap();
        assert_eq!(
            max_leverage_or_default(&info, "HYPE-PERP").await,
            DEFAULT_MAX_LEVERAGE
        );
    }
}
