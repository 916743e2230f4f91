//! Payment strategy selection.
//!
//! # Rules
//! ```text
//! Sponsored  + not eligible → SponsorshipUnavailable (caller re-prompts)
//! Sponsored  + eligible     → Sponsored
//! AssetPaid(a), a unquoted  → UnsupportedAsset
//! AssetPaid(a), a quoted    → AssetPaid { a, with_buffer(cost) }
//! Native                    → Native (always available)
//! ```
//!
//! The selector performs no I/O and never falls back on its own; choosing a
//! fallback belongs to the caller.

use alloy::primitives::U256;

use crate::observability::metrics;
use crate::pricing::types::{FeeAsset, PriceTable};
use crate::quoting::cost::{cost_in_asset, with_buffer, GasEstimate, DEFAULT_BUFFER_BPS};
use crate::quoting::types::{PaymentStrategy, QuotingError, StrategyOption, UserPreference};

/// Deterministic strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategySelector {
    buffer_bps: u32,
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_BPS)
    }
}

impl StrategySelector {
    /// Create a selector applying `buffer_bps` headroom to asset-paid fees.
    pub fn new(buffer_bps: u32) -> Self {
        Self { buffer_bps }
    }

    pub fn buffer_bps(&self) -> u32 {
        self.buffer_bps
    }

    /// Turn the user's preference into a concrete payment strategy.
    pub fn select(
        &self,
        sponsorship_eligible: bool,
        preference: &UserPreference,
        gas_estimate: GasEstimate,
        prices: &PriceTable,
    ) -> Result<PaymentStrategy, QuotingError> {
        let result = match preference {
            UserPreference::Sponsored if sponsorship_eligible => Ok(PaymentStrategy::Sponsored),
            UserPreference::Sponsored => Err(QuotingError::SponsorshipUnavailable),
            UserPreference::AssetPaid(asset) => self.asset_paid(asset, gas_estimate, prices),
            UserPreference::Native => Ok(PaymentStrategy::Native),
        };

        match &result {
            Ok(strategy) => {
                metrics::record_strategy_selected(strategy.kind());
                tracing::debug!(strategy = strategy.kind().as_str(), "Payment strategy selected");
            }
            Err(e) => {
                metrics::record_selection_rejected(e);
                tracing::debug!(reason = e.as_str(), "Payment strategy rejected");
            }
        }
        result
    }

    /// Options that can be offered right now, in presentation order:
    /// sponsored first when eligible, each quoted asset in `assets` order,
    /// native last.
    pub fn available(
        &self,
        sponsorship_eligible: bool,
        assets: &[FeeAsset],
        gas_estimate: GasEstimate,
        prices: &PriceTable,
    ) -> Vec<StrategyOption> {
        let mut options = Vec::with_capacity(assets.len() + 2);

        if sponsorship_eligible {
            options.push(StrategyOption {
                preference: UserPreference::Sponsored,
                estimated_amount: None,
            });
        }

        for asset in assets {
            if let Ok(strategy) = self.asset_paid(asset, gas_estimate, prices) {
                options.push(StrategyOption {
                    preference: UserPreference::AssetPaid(asset.clone()),
                    estimated_amount: strategy.fee_amount(),
                });
            }
        }

        options.push(StrategyOption {
            preference: UserPreference::Native,
            estimated_amount: None,
        });
        options
    }

    fn asset_paid(
        &self,
        asset: &FeeAsset,
        gas_estimate: GasEstimate,
        prices: &PriceTable,
    ) -> Result<PaymentStrategy, QuotingError> {
        let quote = prices
            .get(&asset.address)
            .ok_or(QuotingError::UnsupportedAsset(asset.address))?;
        let cost = cost_in_asset(gas_estimate, Some(quote), asset)?;

        // The cap is never zero, even for a free transaction.
        let max_amount = with_buffer(cost, self.buffer_bps).max(U256::from(1));

        Ok(PaymentStrategy::AssetPaid {
            asset: asset.clone(),
            max_amount,
        })
    }
}
