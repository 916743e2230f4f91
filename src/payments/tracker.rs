//! Transaction lifecycle tracking.
//!
//! # States
//! - Idle: nothing submitted
//! - Pending: handed to the submitter, waiting for a terminal answer
//! - Succeeded / Failed: terminal
//!
//! # State Transitions
//! ```text
//! Idle → Pending: submit()
//! Pending → Succeeded: submitter reports inclusion
//! Pending → Failed: submitter rejects, or the deadline passes (Timeout)
//! Succeeded | Failed → Idle: reset() (starts a new attempt with a new RequestId)
//! ```
//!
//! # Design Decisions
//! - One tracker per logical attempt; `&mut self` rules out concurrent submits
//! - The deadline covers the submit round-trip and status polling together
//! - An overdue `Pending` attempt expires to `Failed(Timeout)` the next time the
//!   tracker is touched, so push-driven callers see the timeout without polling
//! - No automatic retry and no de-duplication

use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout_at, Instant, MissedTickBehavior};

use crate::blockchain::submitter::Submitter;
use crate::blockchain::types::{CallBatch, RequestId, SubmissionStatus};
use crate::config::schema::SubmissionConfig;
use crate::observability::metrics;
use crate::payments::types::{FailureReason, TrackerError, TransactionRecord, TransactionState};
use crate::quoting::types::PaymentStrategy;

/// Tracks one logical submission attempt at a time.
pub struct TransactionTracker {
    submitter: Arc<dyn Submitter>,
    timeout_duration: Duration,
    poll_interval: Duration,
    record: Option<TransactionRecord>,
    deadline: Option<Instant>,
}

impl TransactionTracker {
    /// Create an idle tracker.
    pub fn new(submitter: Arc<dyn Submitter>, config: &SubmissionConfig) -> Self {
        Self {
            submitter,
            timeout_duration: Duration::from_secs(config.timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            record: None,
            deadline: None,
        }
    }

    /// Current state of the attempt, expiring it first if overdue.
    pub fn state(&mut self) -> TransactionState {
        self.expire_overdue();
        self.current_state()
    }

    /// Record of the current attempt, if one was submitted.
    pub fn record(&mut self) -> Option<&TransactionRecord> {
        self.expire_overdue();
        self.record.as_ref()
    }

    fn current_state(&self) -> TransactionState {
        self.record
            .as_ref()
            .map(TransactionRecord::state)
            .unwrap_or(TransactionState::Idle)
    }

    /// Move a `Pending` attempt past its deadline to `Failed(Timeout)`.
    fn expire_overdue(&mut self) {
        let overdue = matches!(self.deadline, Some(deadline) if Instant::now() >= deadline);
        if overdue && self.current_state().is_pending() {
            self.finish(TransactionState::Failed(FailureReason::Timeout));
        }
    }

    /// Submit `calls` paying fees with `strategy`.
    ///
    /// Enters `Pending` with a fresh [`RequestId`] before delegating to the
    /// submitter. A rejection or an elapsed deadline ends the attempt in
    /// `Failed`; the returned id identifies the attempt either way.
    pub async fn submit(
        &mut self,
        strategy: PaymentStrategy,
        calls: &CallBatch,
    ) -> Result<RequestId, TrackerError> {
        self.expire_overdue();
        if let Some(record) = &self.record {
            return Err(match record.state() {
                TransactionState::Pending(id) => TrackerError::AlreadySubmitted(id),
                _ => TrackerError::AttemptFinished(record.request_id()),
            });
        }

        let request_id = RequestId::new();
        let deadline = Instant::now() + self.timeout_duration;
        let kind = strategy.kind();
        self.record = Some(TransactionRecord::pending(request_id, strategy.clone()));
        self.deadline = Some(deadline);

        tracing::info!(
            request_id = %request_id,
            strategy = kind.as_str(),
            calls = calls.len(),
            "Submitting transaction"
        );

        let submitted = timeout_at(
            deadline,
            self.submitter.submit_transaction(request_id, calls, &strategy),
        )
        .await;

        match submitted {
            Ok(Ok(())) => {
                tracing::debug!(request_id = %request_id, "Submission accepted");
            }
            Ok(Err(e)) => self.finish(TransactionState::Failed(e.into())),
            Err(_) => self.finish(TransactionState::Failed(FailureReason::Timeout)),
        }

        Ok(request_id)
    }

    /// Poll the submitter until the pending attempt reaches a terminal state
    /// or its deadline passes.
    ///
    /// Returns the terminal state. Errors from the status surface are treated
    /// as transient and polling continues until the deadline.
    pub async fn wait_for_outcome(&mut self) -> Result<TransactionState, TrackerError> {
        let request_id = match self.state() {
            TransactionState::Pending(id) => id,
            TransactionState::Idle => return Err(TrackerError::NotPending),
            terminal => return Ok(terminal),
        };

        let deadline = self.deadline.unwrap_or_else(|| Instant::now() + self.timeout_duration);
        let submitter = self.submitter.clone();
        let poll_interval = self.poll_interval;

        let polled = timeout_at(deadline, async move {
            let mut ticker = interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                match submitter.status(request_id).await {
                    Ok(SubmissionStatus::Pending) => {
                        tracing::debug!(request_id = %request_id, "Transaction pending");
                    }
                    Ok(status) => return status,
                    Err(e) => {
                        tracing::warn!(request_id = %request_id, error = %e, "Status poll failed");
                    }
                }
            }
        })
        .await;

        let state = match polled {
            Ok(SubmissionStatus::Included(hash)) => TransactionState::Succeeded(hash),
            Ok(SubmissionStatus::Rejected(e)) => TransactionState::Failed(e.into()),
            Ok(SubmissionStatus::Pending) | Err(_) => TransactionState::Failed(FailureReason::Timeout),
        };
        self.finish(state);
        Ok(state)
    }

    /// Apply a status event pushed by the submitter.
    ///
    /// Only legal while `Pending`, and only for the pending request. Events
    /// arriving after the deadline find the attempt already timed out.
    pub fn apply(&mut self, request_id: RequestId, status: SubmissionStatus) -> Result<TransactionState, TrackerError> {
        let expected = match self.state() {
            TransactionState::Pending(id) => id,
            _ => return Err(TrackerError::NotPending),
        };
        if expected != request_id {
            return Err(TrackerError::UnknownRequest {
                expected,
                got: request_id,
            });
        }

        match status {
            SubmissionStatus::Pending => {}
            SubmissionStatus::Included(hash) => self.finish(TransactionState::Succeeded(hash)),
            SubmissionStatus::Rejected(e) => self.finish(TransactionState::Failed(e.into())),
        }
        Ok(self.state())
    }

    /// Discard a finished attempt and return to `Idle`.
    ///
    /// Returns the discarded record. Rejected while an attempt is pending and
    /// not yet past its deadline.
    pub fn reset(&mut self) -> Result<Option<TransactionRecord>, TrackerError> {
        if let TransactionState::Pending(id) = self.state() {
            return Err(TrackerError::InFlight(id));
        }
        self.deadline = None;
        Ok(self.record.take())
    }

    fn finish(&mut self, state: TransactionState) {
        let Some(record) = self.record.as_mut() else {
            return;
        };
        record.set_state(state);

        match state {
            TransactionState::Succeeded(hash) => {
                metrics::record_submission("succeeded");
                tracing::info!(request_id = %record.request_id(), tx_hash = %hash, "Transaction succeeded");
            }
            TransactionState::Failed(reason) => {
                metrics::record_submission(reason.as_str());
                tracing::warn!(request_id = %record.request_id(), reason = %reason, "Transaction failed");
            }
            TransactionState::Idle | TransactionState::Pending(_) => {}
        }
    }
}

impl std::fmt::Debug for TransactionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionTracker")
            .field("state", &self.current_state())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
