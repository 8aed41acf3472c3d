/*
[INPUT]:  Primary wallet signer, target network, polling policy, key store
[OUTPUT]: A funded, activated delegated key with a bound exchange client
[POS]:    Core flow - agent wallet provisioning state machine
[UPDATE]: When the delegation protocol or activation workaround changes
*/

use std::sync::Arc;

use alloy_primitives::Address;
use hyperperp_adapter::{
    EvmWalletSigner, ExchangeClient, InfoClient, Network, PRE_TRANSFER_SOURCE, WalletSigner,
};
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::error::FlowError;
use crate::policy::ActivationPolicy;
use crate::session::SessionKeyStore;

/// Delegate label registered with the exchange
pub const AGENT_NAME: &str = "hyperperp";

/// Quote units moved from the primary wallet to a fresh agent
fn funding_amount() -> Decimal {
    Decimal::new(10, 0)
}

/// Minimal self-transfer used as the activation fallback
fn activation_dust() -> Decimal {
    Decimal::new(1, 2)
}

/// Lifecycle of a delegated key during provisioning.
///
/// Transitions are strictly forward and each is guarded by the result of
/// the corresponding exchange call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Generated,
    Approved,
    Funded,
    Activated,
    Failed,
}

/// A provisioned delegated key, ready to trade
#[derive(Debug)]
pub struct ProvisionedAgent {
    pub address: Address,
    /// Exchange client bound to the agent key
    pub exchange: ExchangeClient,
}

/// Drives one provisioning attempt: generate, approve, fund, activate.
///
/// A fresh key is produced on every call; previously activated agents are
/// never reused.
pub struct AgentProvisioner<'a> {
    info: &'a InfoClient,
    network: Network,
    policy: ActivationPolicy,
    store: &'a SessionKeyStore,
    base_url: Option<&'a str>,
}

impl<'a> AgentProvisioner<'a> {
    pub fn new(
        info: &'a InfoClient,
        network: Network,
        policy: ActivationPolicy,
        store: &'a SessionKeyStore,
    ) -> Self {
        Self {
            info,
            network,
            policy,
            store,
            base_url: None,
        }
    }

    /// Route exchange mutations to an explicit base URL (tests, proxies)
    pub fn with_base_url(mut self, base_url: &'a str) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Provision a new delegated key signed over by `user_wallet`.
    ///
    /// Any signing or network error while generating, approving, or funding
    /// aborts immediately. An exhausted activation budget (including the
    /// self-transfer fallback) fails with `FlowError::Activation`.
    pub async fn provision(
        &self,
        user_wallet: Arc<dyn WalletSigner>,
    ) -> Result<ProvisionedAgent, FlowError> {
        let agent_signer = EvmWalletSigner::random(self.network.chain_id());
        let agent_address = WalletSigner::address(&agent_signer);
        let secret = agent_signer.secret_bytes();
        let mut state = AgentState::Generated;
        info!(state = ?state, agent = %agent_address, "agent key generated");

        let user_exchange = self.exchange_client(user_wallet)?;
        user_exchange.approve_agent(agent_address, AGENT_NAME).await?;
        state = AgentState::Approved;
        info!(state = ?state, "agent approved by primary wallet");

        user_exchange
            .usd_send(agent_address, funding_amount())
            .await?;
        state = AgentState::Funded;
        info!(state = ?state, amount = %funding_amount(), "agent funded");

        let agent_exchange = self.exchange_client(Arc::new(agent_signer))?;

        let info_client = self.info;
        let agent_user = agent_address.to_checksum(None);
        let fallback_exchange = &agent_exchange;
        let activation = self
            .policy
            .wait_for(
                move || {
                    let user = agent_user.clone();
                    async move {
                        let check = info_client
                            .pre_transfer_check(&user, PRE_TRANSFER_SOURCE)
                            .await?;
                        Ok(check.user_exists)
                    }
                },
                || async move {
                    warn!("deposit not recognized, attempting self-transfer to activate");
                    fallback_exchange
                        .usd_send(agent_address, activation_dust())
                        .await?;
                    Ok(())
                },
            )
            .await;

        if let Err(err) = activation {
            state = AgentState::Failed;
            error!(state = ?state, agent = %agent_address, "agent never recognized by ledger");
            return Err(err);
        }

        state = AgentState::Activated;
        self.store.save(&secret, agent_address)?;
        info!(state = ?state, agent = %agent_address, "agent activated and key persisted");

        Ok(ProvisionedAgent {
            address: agent_address,
            exchange: agent_exchange,
        })
    }

    fn exchange_client(
        &self,
        wallet: Arc<dyn WalletSigner>,
    ) -> Result<ExchangeClient, FlowError> {
        let client = match self.base_url {
            Some(url) => ExchangeClient::with_base_url(wallet, self.network, url),
            None => ExchangeClient::new(wallet, self.network),
        }?;
        Ok(client)
    }
}
