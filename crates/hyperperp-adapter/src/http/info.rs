/*
[INPUT]:  Info query parameters (coin symbols, instrument indices, addresses)
[OUTPUT]: Market data and account-existence state (no auth required)
[POS]:    HTTP layer - read-only /info endpoint
[UPDATE]: When adding new info queries or changing response format
*/

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::http::client::HttpClient;
use crate::http::{ClientConfig, Result};
use crate::types::{InfoRequest, MarginTable, Network, PerpsMeta, PreTransferCheck};

/// Read-only client for the exchange's published state
#[derive(Debug, Clone)]
pub struct InfoClient {
    http: HttpClient,
}

impl InfoClient {
    /// Create an info client for the given network
    pub fn new(network: Network) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(network)?,
        })
    }

    /// Create an info client against an explicit base URL (tests, proxies)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_base_url(base_url)?,
        })
    }

    /// Create an info client with custom HTTP configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_config(config, base_url)?,
        })
    }

    /// Mid prices for every listed coin
    ///
    /// POST /info {"type": "allMids"}
    pub async fn all_mids(&self) -> Result<HashMap<String, Decimal>> {
        self.http.post_json("/info", &InfoRequest::AllMids).await
    }

    /// Instrument universe with per-asset metadata
    ///
    /// POST /info {"type": "meta"}
    pub async fn meta(&self) -> Result<PerpsMeta> {
        self.http.post_json("/info", &InfoRequest::Meta).await
    }

    /// Margin tier table for an instrument index
    ///
    /// POST /info {"type": "marginTable", "id": N}
    pub async fn margin_table(&self, id: u32) -> Result<MarginTable> {
        self.http
            .post_json("/info", &InfoRequest::MarginTable { id })
            .await
    }

    /// Account-existence check for an address against a funding-source tag
    ///
    /// POST /info {"type": "preTransferCheck", "user": ..., "source": ...}
    pub async fn pre_transfer_check(&self, user: &str, source: &str) -> Result<PreTransferCheck> {
        self.http
            .post_json(
                "/info",
                &InfoRequest::PreTransferCheck {
                    user: user.to_string(),
                    source: source.to_string(),
                },
            )
            .await
    }
}
