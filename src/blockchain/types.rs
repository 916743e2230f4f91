//! Chain-facing types shared by the engine and its collaborators.

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Address of an account or token contract.
pub type ChainAddress = Address;

/// On-chain amount in the smallest denomination of its asset.
///
/// Every amount handled by the engine uses this one type.
pub type Amount = U256;

/// Hash of an included transaction.
pub type TxHash = B256;

/// Identifier of one logical submission attempt.
///
/// Minted by the tracker when an attempt enters `Pending` and handed to the
/// submitter as the correlation key for status lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate a fresh random request id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of transaction, as understood by the operator's sponsorship policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionKind(pub String);

impl From<&str> for TransactionKind {
    fn from(kind: &str) -> Self {
        Self(kind.to_string())
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single encoded contract invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Target contract.
    pub to: ChainAddress,
    /// Native value attached to the call.
    pub value: Amount,
    /// ABI-encoded calldata.
    pub data: Bytes,
}

/// Pre-encoded calls executed atomically in one transaction.
///
/// The engine attaches a payment strategy to the batch but never looks inside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallBatch {
    calls: Vec<Call>,
}

impl CallBatch {
    /// Wrap already encoded calls.
    pub fn new(calls: Vec<Call>) -> Self {
        Self { calls }
    }

    /// The encoded calls in execution order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Errors reported by the signer/submitter collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitError {
    /// The signer refused to sign the transaction.
    #[error("signer rejected the transaction")]
    SignerRejected,

    /// The user declined the signature prompt.
    #[error("user declined the transaction")]
    UserDeclined,

    /// The network or relay is congested and dropped the request.
    #[error("network congestion")]
    NetworkCongestion,

    /// The transaction was included but reverted.
    #[error("transaction reverted")]
    Reverted,

    /// The relay could not be reached.
    #[error("relay unavailable")]
    RelayUnavailable,
}

/// Status of a submitted request as reported by the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "value")]
pub enum SubmissionStatus {
    /// Accepted but not yet included.
    Pending,
    /// Included on-chain with the given hash.
    Included(TxHash),
    /// Terminally rejected.
    Rejected(SubmitError),
}

impl SubmissionStatus {
    /// Whether no further status change will follow.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}
