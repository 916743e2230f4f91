//! Transaction lifecycle types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::{Amount, RequestId, SubmitError, TxHash};
use crate::pricing::types::FeeAsset;
use crate::quoting::types::PaymentStrategy;

/// Why an attempt ended in `Failed`. A closed set, so display code can map
/// each reason to a fixed, localizable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    SignerRejected,
    UserDeclined,
    NetworkCongestion,
    Reverted,
    RelayUnavailable,
    /// No terminal answer before the submission deadline.
    Timeout,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::SignerRejected => "signer_rejected",
            FailureReason::UserDeclined => "user_declined",
            FailureReason::NetworkCongestion => "network_congestion",
            FailureReason::Reverted => "reverted",
            FailureReason::RelayUnavailable => "relay_unavailable",
            FailureReason::Timeout => "timeout",
        }
    }
}

impl From<SubmitError> for FailureReason {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::SignerRejected => FailureReason::SignerRejected,
            SubmitError::UserDeclined => FailureReason::UserDeclined,
            SubmitError::NetworkCongestion => FailureReason::NetworkCongestion,
            SubmitError::Reverted => FailureReason::Reverted,
            SubmitError::RelayUnavailable => FailureReason::RelayUnavailable,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one logical submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "value")]
pub enum TransactionState {
    /// Nothing submitted yet.
    Idle,
    /// Handed to the submitter, no terminal answer yet.
    Pending(RequestId),
    /// Included on-chain.
    Succeeded(TxHash),
    /// Terminated without inclusion.
    Failed(FailureReason),
}

impl TransactionState {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionState::Succeeded(_) | TransactionState::Failed(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionState::Pending(_))
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionState::Idle => write!(f, "Idle"),
            TransactionState::Pending(id) => write!(f, "Pending({})", id),
            TransactionState::Succeeded(hash) => write!(f, "Succeeded({})", hash),
            TransactionState::Failed(reason) => write!(f, "Failed({})", reason),
        }
    }
}

/// What the presenter needs to know about one attempt.
///
/// The strategy is fixed when the attempt is submitted; only the tracker
/// moves the state forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    request_id: RequestId,
    strategy: PaymentStrategy,
    state: TransactionState,
    gas_asset: Option<FeeAsset>,
    gas_amount: Option<Amount>,
}

impl TransactionRecord {
    /// Record for an attempt that has just entered `Pending`.
    pub fn pending(request_id: RequestId, strategy: PaymentStrategy) -> Self {
        Self {
            request_id,
            gas_asset: strategy.fee_asset().cloned(),
            gas_amount: strategy.fee_amount(),
            strategy,
            state: TransactionState::Pending(request_id),
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn strategy(&self) -> &PaymentStrategy {
        &self.strategy
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Asset the fee is paid in; `None` for sponsored and native fees.
    pub fn gas_asset(&self) -> Option<&FeeAsset> {
        self.gas_asset.as_ref()
    }

    /// Fee cap in the asset's smallest unit; `None` when not computed here.
    pub fn gas_amount(&self) -> Option<Amount> {
        self.gas_amount
    }

    pub(crate) fn set_state(&mut self, state: TransactionState) {
        self.state = state;
    }
}

/// Illegal calls on a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// `submit` while an attempt is still pending.
    #[error("request {0} is already pending")]
    AlreadySubmitted(RequestId),

    /// `submit` after an attempt finished, without `reset`.
    #[error("request {0} already finished; reset before submitting again")]
    AttemptFinished(RequestId),

    /// `reset` while an attempt is in flight.
    #[error("request {0} is in flight and cannot be reset")]
    InFlight(RequestId),

    /// Waiting on or updating a tracker with nothing pending.
    #[error("no pending request")]
    NotPending,

    /// A status update for a request this tracker does not own.
    #[error("status for request {got} does not match pending request {expected}")]
    UnknownRequest { expected: RequestId, got: RequestId },
}
