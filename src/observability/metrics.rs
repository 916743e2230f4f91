//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fee_engine_price_refresh_total` (counter): refreshes by outcome
//! - `fee_engine_price_refresh_duration_seconds` (histogram): refresh latency
//! - `fee_engine_strategy_selected_total` (counter): selections by strategy
//! - `fee_engine_selection_rejected_total` (counter): rejections by reason
//! - `fee_engine_submissions_total` (counter): terminal outcomes

use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::time::Duration;

use crate::observability::ObservabilityError;
use crate::quoting::types::{QuotingError, StrategyKind};

/// Record one price refresh attempt.
pub fn record_price_refresh(success: bool, elapsed: Duration) {
    let outcome = if success { "ok" } else { "error" };
    counter!("fee_engine_price_refresh_total", "outcome" => outcome).increment(1);
    histogram!("fee_engine_price_refresh_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_strategy_selected(kind: StrategyKind) {
    counter!("fee_engine_strategy_selected_total", "strategy" => kind.as_str()).increment(1);
}

pub fn record_selection_rejected(error: &QuotingError) {
    counter!("fee_engine_selection_rejected_total", "reason" => error.as_str()).increment(1);
}

/// Record a terminal submission outcome (`succeeded` or a failure reason).
pub fn record_submission(outcome: &'static str) {
    counter!("fee_engine_submissions_total", "outcome" => outcome).increment(1);
}

/// Install the Prometheus recorder and serve it on `address`.
///
/// Must be called from within a tokio runtime.
pub async fn init_metrics(address: &str) -> Result<PrometheusHandle, ObservabilityError> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| ObservabilityError::InvalidAddress(address.to_string()))?;

    let (recorder, exporter) = PrometheusBuilder::new()
        .with_http_listener(addr)
        .upkeep_timeout(Duration::from_secs(5))
        .build()?;

    let handle = recorder.handle();
    ::metrics::set_global_recorder(recorder).map_err(|_| ObservabilityError::RecorderInstalled)?;
    tokio::spawn(exporter);

    tracing::info!(%addr, "Started metrics server");
    Ok(handle)
}
