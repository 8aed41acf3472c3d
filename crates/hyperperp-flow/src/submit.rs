/*
[INPUT]:  Authentication state, connected wallets, and an order intent
[OUTPUT]: One placed order and a terminal user-visible status
[POS]:    Core flow - order submission sequence
[UPDATE]: When preconditions, leverage handling, or result mapping change
*/

use std::sync::Arc;

use hyperperp_adapter::{
    Grouping, InfoClient, Network, OrderRequest, OrderStatus, OrderType, PRE_TRANSFER_SOURCE,
    Side, TimeInForce, WalletSigner,
};
use rust_decimal::Decimal;
use tracing::{error, info};

use crate::error::{FlowError, ValidationFailure};
use crate::market::resolve_asset_index;
use crate::policy::ActivationPolicy;
use crate::provision::AgentProvisioner;
use crate::session::SessionKeyStore;
use crate::status::Status;

/// A user's order as captured from the form, immutable once submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIntent {
    pub pair: String,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    pub leverage: u32,
}

/// Authentication state handed over by the wallet provider.
///
/// The first connected wallet is the primary signing identity.
pub struct UserSession {
    pub authenticated: bool,
    pub wallets: Vec<Arc<dyn WalletSigner>>,
}

impl UserSession {
    pub fn new(authenticated: bool, wallets: Vec<Arc<dyn WalletSigner>>) -> Self {
        Self {
            authenticated,
            wallets,
        }
    }
}

/// Outcome of an accepted order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedOrder {
    pub oid: u64,
    pub filled: bool,
    pub explorer_url: String,
}

/// Drives one order attempt end to end.
///
/// Every attempt provisions a fresh delegated key before trading; nothing
/// is cached across attempts, and a failed attempt is never retried
/// automatically.
pub struct OrderFlow {
    policy: ActivationPolicy,
    store: SessionKeyStore,
    base_url: Option<String>,
}

impl OrderFlow {
    /// Flow with the default polling budget and session directory
    pub fn new() -> Self {
        Self::with_parts(
            ActivationPolicy::default(),
            SessionKeyStore::new(SessionKeyStore::default_dir()),
        )
    }

    pub fn with_parts(policy: ActivationPolicy, store: SessionKeyStore) -> Self {
        Self {
            policy,
            store,
            base_url: None,
        }
    }

    /// Route all API traffic to an explicit base URL (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Attempt one order and report a terminal status.
    ///
    /// Preconditions are checked in order (auth, intent, network,
    /// instrument, account existence); each rejection short-circuits with
    /// its status before any exchange mutation. Errors past that point are
    /// logged and folded into a failure status.
    pub async fn submit(&self, session: &UserSession, intent: &OrderIntent) -> Status {
        match self.try_submit(session, intent).await {
            Ok(order) => {
                info!(
                    oid = order.oid,
                    filled = order.filled,
                    pair = %intent.pair,
                    "order placed"
                );
                Status::success(order.explorer_url)
            }
            Err(err) => {
                error!(pair = %intent.pair, %err, "order attempt failed");
                Status::from(err)
            }
        }
    }

    async fn try_submit(
        &self,
        session: &UserSession,
        intent: &OrderIntent,
    ) -> Result<SubmittedOrder, FlowError> {
        if !session.authenticated || session.wallets.is_empty() {
            return Err(ValidationFailure::NotAuthenticated.into());
        }
        let wallet = session.wallets[0].clone();

        if intent.price <= Decimal::ZERO || intent.quantity <= Decimal::ZERO {
            return Err(ValidationFailure::InvalidIntent.into());
        }

        let chain_id = wallet.chain_id();
        let network = Network::from_chain_id(chain_id)
            .ok_or(ValidationFailure::WrongNetwork { chain_id })?;
        info!(chain_id, network = ?network, "network validated");

        let info = self.info_client(network)?;

        let meta = info.meta().await?;
        let asset = resolve_asset_index(&meta, &intent.pair).ok_or_else(|| {
            ValidationFailure::UnknownInstrument {
                pair: intent.pair.clone(),
            }
        })?;

        let user_address = wallet.address().to_checksum(None);
        let check = info
            .pre_transfer_check(&user_address, PRE_TRANSFER_SOURCE)
            .await?;
        if !check.user_exists {
            return Err(ValidationFailure::AccountMissing.into());
        }

        let mut provisioner = AgentProvisioner::new(&info, network, self.policy, &self.store);
        if let Some(base_url) = &self.base_url {
            provisioner = provisioner.with_base_url(base_url);
        }
        let agent = provisioner.provision(wallet).await?;

        agent
            .exchange
            .update_leverage(asset, true, intent.leverage)
            .await?;

        let statuses = agent
            .exchange
            .place_order(
                vec![OrderRequest {
                    asset,
                    is_buy: intent.side.is_buy(),
                    limit_px: intent.price.normalize(),
                    sz: intent.quantity.normalize(),
                    reduce_only: false,
                    order_type: OrderType::Limit {
                        tif: TimeInForce::Gtc,
                    },
                    cloid: None,
                }],
                Grouping::Na,
            )
            .await?;

        match statuses.first() {
            Some(OrderStatus::Resting(resting)) => Ok(SubmittedOrder {
                oid: resting.oid,
                filled: false,
                explorer_url: network.explorer_tx_url(resting.oid),
            }),
            Some(OrderStatus::Filled(filled)) => Ok(SubmittedOrder {
                oid: filled.oid,
                filled: true,
                explorer_url: network.explorer_tx_url(filled.oid),
            }),
            Some(OrderStatus::Error(message)) => Err(FlowError::Submission(message.clone())),
            None => Err(FlowError::Submission(
                "order response contained no statuses".to_string(),
            )),
        }
    }

    fn info_client(&self, network: Network) -> Result<InfoClient, FlowError> {
        let client = match &self.base_url {
            Some(base_url) => InfoClient::with_base_url(base_url),
            None => InfoClient::new(network),
        }?;
        Ok(client)
    }
}

impl Default for OrderFlow {
    fn default() -> Self {
        Self::new()
    }
}
