/*
[INPUT]:  Trading actions and a wallet signer
[OUTPUT]: Signed /exchange mutations and typed acknowledgements
[POS]:    HTTP layer - authenticated trading endpoint
[UPDATE]: When adding new actions or changing the envelope format
*/

use std::sync::Arc;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::auth::WalletSigner;
use crate::http::client::HttpClient;
use crate::http::{HyperliquidError, Result};
use crate::signing::{next_nonce, sign_l1_action, sign_user_action};
use crate::types::{
    ExchangePayload, ExchangeResponse, Grouping, L1Action, Network, OkResponse, OrderRequest,
    OrderStatus, UserAction,
};

/// Mutation client bound to one signing key and one network.
///
/// The same type serves the primary wallet (agent approval, funding) and
/// the delegated agent key (leverage updates, orders, self-transfers);
/// which actions succeed is decided by the exchange, not by this client.
#[derive(Debug)]
pub struct ExchangeClient {
    http: HttpClient,
    wallet: Arc<dyn WalletSigner>,
    network: Network,
}

impl ExchangeClient {
    /// Create an exchange client for the given wallet and network
    pub fn new(wallet: Arc<dyn WalletSigner>, network: Network) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(network)?,
            wallet,
            network,
        })
    }

    /// Create an exchange client against an explicit base URL (tests, proxies)
    pub fn with_base_url(
        wallet: Arc<dyn WalletSigner>,
        network: Network,
        base_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_base_url(base_url)?,
            wallet,
            network,
        })
    }

    /// Address of the bound signing key
    pub fn wallet_address(&self) -> Address {
        self.wallet.address()
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Register an address as an authorized trading delegate of this
    /// wallet's account. Signed by the wallet itself (user-signed action).
    ///
    /// POST /exchange {"action": {"type": "approveAgent", ...}}
    pub async fn approve_agent(&self, agent_address: Address, agent_name: &str) -> Result<()> {
        let nonce = next_nonce();
        let action = UserAction::ApproveAgent {
            hyperliquid_chain: self.network.hyperliquid_chain().to_string(),
            signature_chain_id: self.network.signature_chain_id_hex(),
            agent_address: agent_address.to_checksum(None),
            agent_name: agent_name.to_string(),
            nonce,
        };
        let signature = sign_user_action(self.wallet.as_ref(), &action).await?;
        debug!(agent = %agent_address, name = agent_name, "approving agent");
        let response = self.post_action(&action, nonce, signature).await?;
        expect_ack(response)
    }

    /// Send quote currency to an address. Signed by the bound wallet
    /// (user-signed action).
    ///
    /// POST /exchange {"action": {"type": "usdSend", ...}}
    pub async fn usd_send(&self, destination: Address, amount: Decimal) -> Result<()> {
        let nonce = next_nonce();
        let action = UserAction::UsdSend {
            hyperliquid_chain: self.network.hyperliquid_chain().to_string(),
            signature_chain_id: self.network.signature_chain_id_hex(),
            destination: destination.to_checksum(None),
            amount,
            time: nonce,
        };
        let signature = sign_user_action(self.wallet.as_ref(), &action).await?;
        debug!(destination = %destination, %amount, "sending usd");
        let response = self.post_action(&action, nonce, signature).await?;
        expect_ack(response)
    }

    /// Set leverage for an instrument index (L1 action)
    ///
    /// POST /exchange {"action": {"type": "updateLeverage", ...}}
    pub async fn update_leverage(&self, asset: u32, is_cross: bool, leverage: u32) -> Result<()> {
        let action = L1Action::UpdateLeverage {
            asset,
            is_cross,
            leverage,
        };
        debug!(asset, is_cross, leverage, "updating leverage");
        let response = self.post_l1_action(&action).await?;
        expect_ack(response)
    }

    /// Submit a batch of orders (L1 action), returning per-order statuses
    ///
    /// POST /exchange {"action": {"type": "order", ...}}
    pub async fn place_order(
        &self,
        orders: Vec<OrderRequest>,
        grouping: Grouping,
    ) -> Result<Vec<OrderStatus>> {
        let count = orders.len();
        let action = L1Action::Order { orders, grouping };
        debug!(count, "placing orders");
        let response = self.post_l1_action(&action).await?;
        match response {
            OkResponse::Order(data) => Ok(data.statuses),
            OkResponse::Default => Err(HyperliquidError::InvalidResponse(
                "order submission returned no statuses".to_string(),
            )),
        }
    }

    async fn post_l1_action(&self, action: &L1Action) -> Result<OkResponse> {
        let nonce = next_nonce();
        let signature =
            sign_l1_action(self.wallet.as_ref(), self.network, action, nonce, None).await?;
        self.post_action(action, nonce, signature).await
    }

    async fn post_action<A: Serialize>(
        &self,
        action: &A,
        nonce: u64,
        signature: crate::types::WireSignature,
    ) -> Result<OkResponse> {
        let payload = ExchangePayload {
            action,
            nonce,
            signature,
            vault_address: None,
        };
        let response: ExchangeResponse = self.http.post_json("/exchange", &payload).await?;
        match response {
            ExchangeResponse::Ok(ok) => Ok(ok),
            ExchangeResponse::Err(message) => Err(HyperliquidError::Exchange(message)),
        }
    }
}

fn expect_ack(response: OkResponse) -> Result<()> {
    match response {
        OkResponse::Default => Ok(()),
        other => Err(HyperliquidError::InvalidResponse(format!(
            "unexpected acknowledgement payload: {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::EvmWalletSigner;
    use crate::types::{OrderType, TimeInForce};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_client(base_url: &str) -> ExchangeClient {
        let wallet = Arc::new(EvmWalletSigner::from_hex(TEST_KEY, 998).unwrap());
        ExchangeClient::with_base_url(wallet, Network::Testnet, base_url).expect("client init")
    }

    #[tokio::test]
    async fn test_update_leverage_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exchange"))
            .and(body_partial_json(json!({
                "action": {"type": "updateLeverage", "asset": 0, "isCross": true, "leverage": 5}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ok", "response": {"type": "default"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .update_leverage(0, true, 5)
            .await
            .expect("update_leverage failed");
    }

    #[tokio::test]
    async fn test_place_order_resting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exchange"))
            .and(body_partial_json(json!({
                "action": {
                    "type": "order",
                    "orders": [{"a": 0, "b": true, "p": "0.02", "s": "1", "r": false}],
                    "grouping": "na"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "response": {
                    "type": "order",
                    "data": {"statuses": [{"resting": {"oid": 77738308}}]}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let statuses = client
            .place_order(
                vec![OrderRequest {
                    asset: 0,
                    is_buy: true,
                    limit_px: dec!(0.02),
                    sz: dec!(1),
                    reduce_only: false,
                    order_type: OrderType::Limit {
                        tif: TimeInForce::Gtc,
                    },
                    cloid: None,
                }],
                Grouping::Na,
            )
            .await
            .expect("place_order failed");

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].oid(), Some(77738308));
    }

    #[tokio::test]
    async fn test_approve_agent_sends_checksummed_address() {
        let server = MockServer::start().await;
        let agent = EvmWalletSigner::random(998);
        let agent_address = WalletSigner::address(&agent);

        Mock::given(method("POST"))
            .and(path("/exchange"))
            .and(body_partial_json(json!({
                "action": {
                    "type": "approveAgent",
                    "hyperliquidChain": "Testnet",
                    "signatureChainId": "0x3e6",
                    "agentAddress": agent_address.to_checksum(None),
                    "agentName": "hyperperp"
                }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "ok", "response": {"type": "default"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client
            .approve_agent(agent_address, "hyperperp")
            .await
            .expect("approve_agent failed");
    }

    #[tokio::test]
    async fn test_exchange_err_envelope_surfaces() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/exchange"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "err",
                "response": "Insufficient balance for withdrawal"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let destination = client.wallet_address();
        let err = client
            .usd_send(destination, dec!(10))
            .await
            .expect_err("expected rejection");

        match err {
            HyperliquidError::Exchange(message) => {
                assert_eq!(message, "Insufficient balance for withdrawal");
            }
            other => panic!("expected Exchange error, got {other:?}"),
        }
    }
}
