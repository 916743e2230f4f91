//! Blockchain collaborator subsystem.
//!
//! # Data Flow
//! ```text
//! call encoder (external)
//!     → types.rs (CallBatch, opaque to the engine)
//!     → eligibility.rs (operator sponsorship policy)
//!     → submitter.rs (sign, submit, report status)
//! ```
//!
//! # Constraints
//! - The engine never signs or holds keys
//! - Collaborators are shared as `Arc<dyn Trait>` and must be `Send + Sync`

pub mod eligibility;
pub mod submitter;
pub mod types;

pub use eligibility::{EligibilitySource, StaticEligibility};
pub use submitter::Submitter;
pub use types::{
    Amount, Call, CallBatch, ChainAddress, RequestId, SubmissionStatus, SubmitError, TransactionKind, TxHash,
};
