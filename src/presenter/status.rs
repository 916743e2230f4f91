//! Status views.

use alloy::primitives::utils::format_units;
use serde::Serialize;

use crate::blockchain::types::{Amount, RequestId, TxHash};
use crate::payments::types::{FailureReason, TransactionRecord, TransactionState};
use crate::quoting::types::PaymentStrategy;

/// Coarse lifecycle phase for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPhase {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// User-facing summary of one attempt.
///
/// Optional fields are `None` whenever the record lacks the data; nothing is
/// filled in with placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub phase: StatusPhase,
    pub request_id: Option<RequestId>,
    /// "Sponsored, no fee", "Paid in USDC", "Paid in native token".
    pub fee_label: Option<String>,
    pub fee_symbol: Option<String>,
    /// Fee cap formatted with the asset's decimals.
    pub fee_amount: Option<String>,
    pub tx_hash: Option<TxHash>,
    pub message: String,
    /// Whether the user can start a new attempt.
    pub retryable: bool,
}

/// Project an optional record; `None` renders the idle view.
pub fn present(record: Option<&TransactionRecord>) -> StatusView {
    match record {
        Some(record) => present_record(record),
        None => StatusView {
            phase: StatusPhase::Idle,
            request_id: None,
            fee_label: None,
            fee_symbol: None,
            fee_amount: None,
            tx_hash: None,
            message: "No transaction submitted".to_string(),
            retryable: false,
        },
    }
}

pub fn present_record(record: &TransactionRecord) -> StatusView {
    let (fee_label, fee_symbol, fee_amount) = fee_fields(record);

    let (phase, tx_hash, message, retryable) = match record.state() {
        TransactionState::Idle => (StatusPhase::Idle, None, "No transaction submitted".to_string(), false),
        TransactionState::Pending(_) => (
            StatusPhase::Pending,
            None,
            "Transaction submitted, waiting for confirmation".to_string(),
            false,
        ),
        TransactionState::Succeeded(hash) => {
            (StatusPhase::Succeeded, Some(hash), "Transaction confirmed".to_string(), false)
        }
        TransactionState::Failed(reason) => (StatusPhase::Failed, None, failure_message(reason).to_string(), true),
    };

    StatusView {
        phase,
        request_id: Some(record.request_id()),
        fee_label: Some(fee_label),
        fee_symbol,
        fee_amount,
        tx_hash,
        message,
        retryable,
    }
}

fn fee_fields(record: &TransactionRecord) -> (String, Option<String>, Option<String>) {
    match record.strategy() {
        PaymentStrategy::Sponsored => ("Sponsored, no fee".to_string(), None, None),
        PaymentStrategy::Native => ("Paid in native token".to_string(), None, None),
        PaymentStrategy::AssetPaid { asset, .. } => {
            let amount = record.gas_amount().map(|amount| format_amount(amount, asset.decimals));
            (format!("Paid in {}", asset.symbol), Some(asset.symbol.clone()), amount)
        }
    }
}

/// Format `amount` in whole-asset units, dropping trailing zeros.
///
/// Configured assets never exceed
/// [`MAX_ASSET_DECIMALS`](crate::config::validation::MAX_ASSET_DECIMALS); past
/// that the raw smallest-unit integer is returned.
pub fn format_amount(amount: Amount, decimals: u8) -> String {
    match format_units(amount, decimals) {
        Ok(formatted) if formatted.contains('.') => {
            formatted.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        Ok(formatted) => formatted,
        Err(_) => amount.to_string(),
    }
}

/// Specific, actionable message for each failure reason.
pub fn failure_message(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::SignerRejected => "The wallet could not sign this transaction",
        FailureReason::UserDeclined => "You declined the transaction in your wallet",
        FailureReason::NetworkCongestion => "The network is congested; try again shortly",
        FailureReason::Reverted => "The transaction was reverted on-chain",
        FailureReason::RelayUnavailable => "The fee relay is unavailable; choose another payment option or retry",
        FailureReason::Timeout => "No confirmation before the deadline; check your wallet before retrying",
    }
}
