//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! pricing, quoting, payments
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms via the metrics facade)
//!
//! Consumers:
//!     → stdout (plain or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every lifecycle event
//! - Metrics are no-ops until a recorder is installed
//! - Call data is never logged

pub mod logging;
pub mod metrics;

use thiserror::Error;

pub use self::logging::init_logging;
pub use self::metrics::init_metrics;

/// Errors raised while installing observability backends.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to build metrics exporter: {0}")]
    MetricsBuild(#[from] metrics_exporter_prometheus::BuildError),

    #[error("a metrics recorder is already installed")]
    RecorderInstalled,

    #[error("invalid metrics address {0}")]
    InvalidAddress(String),
}
