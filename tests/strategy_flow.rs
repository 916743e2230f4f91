//! End-to-end strategy selection and lifecycle scenarios.

mod common;

use std::sync::Arc;

use alloy::primitives::{TxHash, U256};
use common::*;
use fee_engine::blockchain::{CallBatch, ChainAddress, StaticEligibility, SubmissionStatus, SubmitError};
use fee_engine::payments::{FailureReason, TransactionState};
use fee_engine::presenter::{present, StatusPhase};
use fee_engine::quoting::{PaymentStrategy, QuotingError, UserPreference};
use fee_engine::FeeEngine;

fn engine(prices: Arc<StaticPrices>, submitter: Arc<ScriptedSubmitter>) -> FeeEngine {
    let config = engine_config();
    let eligibility = Arc::new(StaticEligibility::from_config(&config.sponsorship));
    FeeEngine::new(config, prices, eligibility, submitter).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_sponsored_happy_path() {
    let hash = TxHash::repeat_byte(0xab);
    let submitter = ScriptedSubmitter::new(
        SubmitScript::Accept,
        vec![SubmissionStatus::Pending, SubmissionStatus::Included(hash)],
    );
    let engine = engine(StaticPrices::new(&[(usdc().address, 2)]), submitter.clone());

    let strategy = engine
        .select(&"mint".into(), ChainAddress::ZERO, &UserPreference::Sponsored, U256::from(500_000u64))
        .await
        .unwrap();
    assert_eq!(strategy, PaymentStrategy::Sponsored);

    let mut tracker = engine.tracker();
    let id = tracker.submit(strategy, &CallBatch::default()).await.unwrap();
    assert_eq!(tracker.state(), TransactionState::Pending(id));
    assert_eq!(present(tracker.record()).phase, StatusPhase::Pending);

    let state = tracker.wait_for_outcome().await.unwrap();
    assert_eq!(state, TransactionState::Succeeded(hash));

    let view = present(tracker.record());
    assert_eq!(view.fee_label.as_deref(), Some("Sponsored, no fee"));
    assert_eq!(view.fee_amount, None);
    assert_eq!(view.tx_hash, Some(hash));
    assert_eq!(view.request_id, Some(id));

    let submitted = submitter.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].0, id);
    assert_eq!(submitted[0].1, PaymentStrategy::Sponsored);
}

#[tokio::test]
async fn test_asset_paid_with_buffer() {
    let submitter = ScriptedSubmitter::new(SubmitScript::Accept, Vec::new());
    let engine = engine(StaticPrices::new(&[(usdc().address, 2)]), submitter.clone());
    engine.refresh_prices().await.unwrap();

    let strategy = engine
        .select(
            &"swap".into(),
            ChainAddress::ZERO,
            &UserPreference::AssetPaid(usdc()),
            U256::from(1_000_000u64),
        )
        .await
        .unwrap();
    assert_eq!(
        strategy,
        PaymentStrategy::AssetPaid {
            asset: usdc(),
            max_amount: U256::from(2_200_000u64),
        }
    );

    let mut tracker = engine.tracker();
    tracker.submit(strategy, &CallBatch::default()).await.unwrap();
    let view = present(tracker.record());
    assert_eq!(view.fee_label.as_deref(), Some("Paid in USDC"));
    assert_eq!(view.fee_amount.as_deref(), Some("2.2"));
    assert_eq!(submitter.submitted()[0].1.fee_amount(), Some(U256::from(2_200_000u64)));
}

#[tokio::test]
async fn test_unsupported_asset_creates_no_record() {
    let submitter = ScriptedSubmitter::new(SubmitScript::Accept, Vec::new());
    let engine = engine(StaticPrices::new(&[(usdc().address, 2)]), submitter.clone());
    engine.refresh_prices().await.unwrap();

    let result = engine
        .select(&"swap".into(), ChainAddress::ZERO, &UserPreference::AssetPaid(dai()), U256::from(1u64))
        .await;
    assert_eq!(result, Err(QuotingError::UnsupportedAsset(dai().address)));

    let mut tracker = engine.tracker();
    assert!(tracker.record().is_none());
    assert!(submitter.submitted().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_submission_timeout_then_new_attempt() {
    let submitter = ScriptedSubmitter::new(SubmitScript::Hang, Vec::new());
    let engine = engine(StaticPrices::new(&[(usdc().address, 2)]), submitter.clone());

    let mut tracker = engine.tracker();
    let first = tracker.submit(PaymentStrategy::Native, &CallBatch::default()).await.unwrap();
    assert_eq!(tracker.state(), TransactionState::Failed(FailureReason::Timeout));

    let view = present(tracker.record());
    assert_eq!(view.phase, StatusPhase::Failed);
    assert!(view.retryable);
    assert_eq!(view.tx_hash, None);

    let old = tracker.reset().unwrap().unwrap();
    assert_eq!(old.state(), TransactionState::Failed(FailureReason::Timeout));
    assert_eq!(tracker.state(), TransactionState::Idle);

    let second = tracker.submit(PaymentStrategy::Native, &CallBatch::default()).await.unwrap();
    assert_ne!(first, second);

    let ids: Vec<_> = submitter.submitted().into_iter().map(|(id, _, _)| id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test(start_paused = true)]
async fn test_rejected_status_ends_in_failure() {
    let submitter = ScriptedSubmitter::new(
        SubmitScript::Accept,
        vec![SubmissionStatus::Rejected(SubmitError::NetworkCongestion)],
    );
    let engine = engine(StaticPrices::new(&[]), submitter);

    let mut tracker = engine.tracker();
    tracker.submit(PaymentStrategy::Native, &CallBatch::default()).await.unwrap();
    let state = tracker.wait_for_outcome().await.unwrap();
    assert_eq!(state, TransactionState::Failed(FailureReason::NetworkCongestion));
    assert_eq!(present(tracker.record()).fee_label.as_deref(), Some("Paid in native token"));
}

#[tokio::test]
async fn test_user_declined_at_submit() {
    let submitter = ScriptedSubmitter::new(SubmitScript::Reject(SubmitError::UserDeclined), Vec::new());
    let engine = engine(StaticPrices::new(&[]), submitter);

    let mut tracker = engine.tracker();
    tracker.submit(PaymentStrategy::Sponsored, &CallBatch::default()).await.unwrap();
    assert_eq!(tracker.state(), TransactionState::Failed(FailureReason::UserDeclined));
    assert_eq!(tracker.wait_for_outcome().await.unwrap(), tracker.state());
}

#[tokio::test]
async fn test_stale_prices_keep_last_table() {
    let prices = StaticPrices::new(&[(usdc().address, 3)]);
    let submitter = ScriptedSubmitter::new(SubmitScript::Accept, Vec::new());
    let engine = engine(prices.clone(), submitter);

    engine.refresh_prices().await.unwrap();
    prices.set_failing(true);
    assert!(engine.refresh_prices().await.is_err());
    assert!(engine.prices_stale());

    let strategy = engine
        .select(&"swap".into(), ChainAddress::ZERO, &UserPreference::AssetPaid(usdc()), U256::from(10u64))
        .await
        .unwrap();
    assert_eq!(strategy.fee_amount(), Some(U256::from(33u64)));
}
