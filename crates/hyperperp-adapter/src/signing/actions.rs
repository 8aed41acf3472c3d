/*
[INPUT]:  L1/user actions, nonces, and a wallet signer
[OUTPUT]: Wire signatures for the /exchange envelope
[POS]:    Signing layer - action-specific hashing and signing
[UPDATE]: When the exchange adds action types or changes hash inputs
*/

use alloy_primitives::{Address, B256, keccak256};
use chrono::Utc;
use serde::Serialize;

use crate::auth::WalletSigner;
use crate::http::{HyperliquidError, Result};
use crate::signing::eip712;
use crate::types::{Network, UserAction, WireSignature};

const L1_DOMAIN_NAME: &str = "Exchange";
const USER_DOMAIN_NAME: &str = "HyperliquidSignTransaction";
const DOMAIN_VERSION: &str = "1";
/// L1 actions are always signed under this fixed chain id,
/// independent of the wallet's network
const L1_CHAIN_ID: u64 = 1337;

const AGENT_TYPE: &str = "Agent(string source,bytes32 connectionId)";
const APPROVE_AGENT_TYPE: &str = "HyperliquidTransaction:ApproveAgent(string hyperliquidChain,address agentAddress,string agentName,uint64 nonce)";
const USD_SEND_TYPE: &str = "HyperliquidTransaction:UsdSend(string hyperliquidChain,string destination,string amount,uint64 time)";

/// Millisecond timestamp nonce for exchange actions
pub fn next_nonce() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Hash an L1 action: `keccak256(msgpack(action) ‖ nonce_be ‖ vault_flag)`
pub fn action_hash<A: Serialize>(action: &A, nonce: u64, vault: Option<Address>) -> Result<B256> {
    let mut bytes = rmp_serde::to_vec_named(action)?;
    bytes.extend_from_slice(&nonce.to_be_bytes());
    match vault {
        None => bytes.push(0x00),
        Some(address) => {
            bytes.push(0x01);
            bytes.extend_from_slice(address.as_slice());
        }
    }
    Ok(keccak256(&bytes))
}

/// Sign an L1 action (order, leverage update) with the bound key.
///
/// The action hash becomes the `connectionId` of a phantom agent struct
/// signed under the fixed "Exchange" domain.
pub async fn sign_l1_action<A: Serialize>(
    wallet: &dyn WalletSigner,
    network: Network,
    action: &A,
    nonce: u64,
    vault: Option<Address>,
) -> Result<WireSignature> {
    let connection_id = action_hash(action, nonce, vault)?;
    let domain = eip712::domain_separator(L1_DOMAIN_NAME, DOMAIN_VERSION, L1_CHAIN_ID);
    let agent_hash = eip712::struct_hash(
        AGENT_TYPE,
        &[eip712::word_string(network.agent_source()), connection_id],
    );
    let hash = eip712::signing_hash(domain, agent_hash);
    let signature = wallet.sign_hash(hash).await?;
    Ok(signature.into())
}

/// Sign a user action (agent approval, fund transfer) as typed data
/// under the wallet's own chain id.
pub async fn sign_user_action(
    wallet: &dyn WalletSigner,
    action: &UserAction,
) -> Result<WireSignature> {
    let struct_hash = user_struct_hash(action)?;
    let domain = eip712::domain_separator(USER_DOMAIN_NAME, DOMAIN_VERSION, wallet.chain_id());
    let hash = eip712::signing_hash(domain, struct_hash);
    let signature = wallet.sign_hash(hash).await?;
    Ok(signature.into())
}

fn user_struct_hash(action: &UserAction) -> Result<B256> {
    match action {
        UserAction::ApproveAgent {
            hyperliquid_chain,
            agent_address,
            agent_name,
            nonce,
            ..
        } => {
            let agent_address: Address = agent_address.parse().map_err(|_| {
                HyperliquidError::Config(format!("Invalid agent address: {agent_address}"))
            })?;
            Ok(eip712::struct_hash(
                APPROVE_AGENT_TYPE,
                &[
                    eip712::word_string(hyperliquid_chain),
                    eip712::word_address(agent_address),
                    eip712::word_string(agent_name),
                    eip712::word_u64(*nonce),
                ],
            ))
        }
        UserAction::UsdSend {
            hyperliquid_chain,
            destination,
            amount,
            time,
            ..
        } => Ok(eip712::struct_hash(
            USD_SEND_TYPE,
            &[
                eip712::word_string(hyperliquid_chain),
                eip712::word_string(destination),
                eip712::word_string(&amount.to_string()),
                eip712::word_u64(*time),
            ],
        )),
    }
}
