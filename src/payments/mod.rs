//! Transaction lifecycle subsystem.

pub mod tracker;
pub mod types;

pub use tracker::TransactionTracker;
pub use types::{FailureReason, TrackerError, TransactionRecord, TransactionState};
