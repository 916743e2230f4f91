//! Signer/submitter collaborator interface.
//!
//! # Responsibilities
//! - Hand a call batch plus its fee mode to the wallet/relay for signing
//! - Report the status of a previously submitted request
//!
//! The engine never signs anything itself; implementations live with the
//! wallet integration.

use async_trait::async_trait;

use crate::blockchain::types::{CallBatch, RequestId, SubmissionStatus, SubmitError};
use crate::quoting::PaymentStrategy;

/// External signer and submitter of transactions.
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Sign and submit `calls`, paying fees according to `fee_mode`.
    ///
    /// `request_id` is the correlation key later passed to [`Submitter::status`].
    /// Returning `Ok` means the request was accepted, not that it was included.
    async fn submit_transaction(
        &self,
        request_id: RequestId,
        calls: &CallBatch,
        fee_mode: &PaymentStrategy,
    ) -> Result<(), SubmitError>;

    /// Current status of an accepted request.
    async fn status(&self, request_id: RequestId) -> Result<SubmissionStatus, SubmitError>;
}
