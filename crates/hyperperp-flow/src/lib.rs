/*
[INPUT]:  Public API exports for hyperperp-flow crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod error;
pub mod market;
pub mod policy;
pub mod provision;
pub mod session;
pub mod status;
pub mod submit;

// Re-export main types for convenience
pub use error::{FlowError, ValidationFailure};
pub use policy::ActivationPolicy;
pub use provision::{AgentProvisioner, AgentState, ProvisionedAgent};
pub use session::SessionKeyStore;
pub use status::Status;
pub use submit::{OrderFlow, OrderIntent, SubmittedOrder, UserSession};
