/*
[INPUT]:  Failure causes from validation, provisioning, and submission
[OUTPUT]: The flow's three-way error taxonomy
[POS]:    Error handling layer - order attempt outcomes
[UPDATE]: When adding new rejection causes or changing user-facing text
*/

use hyperperp_adapter::HyperliquidError;
use thiserror::Error;

/// Precondition failures reported before any side effect is attempted.
///
/// The display strings are the user-facing status messages; the UI layer
/// shows them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Please log in and connect a wallet")]
    NotAuthenticated,

    #[error("Wrong network. Switch to HyperEVM Testnet (998) or Mainnet (999).")]
    WrongNetwork { chain_id: u64 },

    #[error("Invalid trading pair")]
    UnknownInstrument { pair: String },

    #[error("Price and quantity must be positive")]
    InvalidIntent,

    #[error("Hyperliquid account does not exist for this wallet.")]
    AccountMissing,
}

/// Terminal failure of one order attempt
#[derive(Debug, Error)]
pub enum FlowError {
    /// Rejected before side effects; no exchange mutation was attempted
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// The delegated key was never recognized by the ledger after the
    /// polling budget and the self-transfer fallback
    #[error("Agent wallet activation failed")]
    Activation,

    /// Any signing, network, or exchange-side failure during the
    /// provisioning/leverage/order sequence
    #[error("Failed to place order: {0}")]
    Submission(String),
}

impl From<HyperliquidError> for FlowError {
    fn from(err: HyperliquidError) -> Self {
        FlowError::Submission(err.to_string())
    }
}

impl From<std::io::Error> for FlowError {
    fn from(err: std::io::Error) -> Self {
        FlowError::Submission(format!("session store error: {err}"))
    }
}
