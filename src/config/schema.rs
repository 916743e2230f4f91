//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the engine.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::pricing::types::FeeAsset;
use crate::quoting::cost::DEFAULT_BUFFER_BPS;

/// Root configuration for the fee engine.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Accepted fee-payment assets.
    pub assets: Vec<FeeAsset>,

    /// Fee computation settings.
    pub fees: FeeConfig,

    /// Price relay settings.
    pub price_source: PriceSourceConfig,

    /// Submission and lifecycle tracking settings.
    pub submission: SubmissionConfig,

    /// Operator sponsorship policy.
    pub sponsorship: SponsorshipConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl EngineConfig {
    /// Configured asset with the given address.
    pub fn asset(&self, address: &crate::blockchain::ChainAddress) -> Option<&FeeAsset> {
        self.assets.iter().find(|asset| &asset.address == address)
    }
}

/// Fee computation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Headroom added on top of the computed asset cost, in basis points.
    pub buffer_bps: u32,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            buffer_bps: DEFAULT_BUFFER_BPS,
        }
    }
}

/// Price relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PriceSourceConfig {
    /// Relay endpoint serving fee-token prices.
    pub url: String,

    /// Failover relay endpoints, tried in order.
    pub failover_urls: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PriceSourceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9119/prices".to_string(),
            failover_urls: Vec::new(),
            timeout_secs: 10,
        }
    }
}

/// Submission configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Deadline for an attempt to reach a terminal state, in seconds.
    pub timeout_secs: u64,

    /// Interval between status polls in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            poll_interval_ms: 1000,
        }
    }
}

/// Sponsorship policy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SponsorshipConfig {
    /// Transaction kinds the operator sponsors.
    pub eligible_kinds: Vec<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
