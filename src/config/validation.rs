//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Asset list integrity (non-empty, unique addresses and symbols)
//! - Validate value ranges (timeouts > 0, buffer within bounds)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: EngineConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the engine

use std::collections::HashSet;
use thiserror::Error;

use crate::blockchain::ChainAddress;
use crate::config::schema::EngineConfig;

/// Largest accepted fee buffer (100%).
pub const MAX_BUFFER_BPS: u32 = 10_000;

/// Largest decimals a U256 amount can be formatted with.
pub const MAX_ASSET_DECIMALS: u8 = 77;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no fee assets configured")]
    NoAssets,

    #[error("fee asset at index {0} has an empty symbol")]
    EmptySymbol(usize),

    #[error("duplicate fee asset address {0}")]
    DuplicateAddress(ChainAddress),

    #[error("duplicate fee asset symbol {0}")]
    DuplicateSymbol(String),

    #[error("fee buffer {0} bps exceeds maximum {max} bps", max = MAX_BUFFER_BPS)]
    BufferTooLarge(u32),

    #[error("fee asset {symbol} has {decimals} decimals, maximum is {max}", max = MAX_ASSET_DECIMALS)]
    TooManyDecimals { symbol: String, decimals: u8 },

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("invalid price source URL '{0}'")]
    InvalidUrl(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &EngineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.assets.is_empty() {
        errors.push(ValidationError::NoAssets);
    }

    let mut addresses = HashSet::new();
    let mut symbols = HashSet::new();
    for (i, asset) in config.assets.iter().enumerate() {
        if asset.symbol.trim().is_empty() {
            errors.push(ValidationError::EmptySymbol(i));
        } else if !symbols.insert(asset.symbol.as_str()) {
            errors.push(ValidationError::DuplicateSymbol(asset.symbol.clone()));
        }
        if !addresses.insert(asset.address) {
            errors.push(ValidationError::DuplicateAddress(asset.address));
        }
        if asset.decimals > MAX_ASSET_DECIMALS {
            errors.push(ValidationError::TooManyDecimals {
                symbol: asset.symbol.clone(),
                decimals: asset.decimals,
            });
        }
    }

    if config.fees.buffer_bps > MAX_BUFFER_BPS {
        errors.push(ValidationError::BufferTooLarge(config.fees.buffer_bps));
    }

    if config.submission.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("submission.timeout_secs"));
    }
    if config.submission.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroDuration("submission.poll_interval_ms"));
    }
    if config.price_source.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("price_source.timeout_secs"));
    }

    let urls = std::iter::once(&config.price_source.url).chain(&config.price_source.failover_urls);
    for raw in urls {
        if url::Url::parse(raw).is_err() {
            errors.push(ValidationError::InvalidUrl(raw.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
