/*
[INPUT]:  Actions, nonces, and wallet signers
[OUTPUT]: Wire signatures accepted by /exchange
[POS]:    Signing layer - EIP-712 and L1 action hashing
[UPDATE]: When the exchange changes signing domains or action encodings
*/

pub mod actions;
pub mod eip712;

pub use actions::{action_hash, next_nonce, sign_l1_action, sign_user_action};
