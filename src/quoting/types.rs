//! Payment strategy types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::{Amount, ChainAddress};
use crate::pricing::types::FeeAsset;

/// How a transaction's network fee is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum PaymentStrategy {
    /// Fee fully covered by an operator-funded allowance.
    Sponsored,
    /// Fee paid in a non-native asset through the relay, capped at `max_amount`.
    AssetPaid {
        asset: FeeAsset,
        /// Cap in the asset's smallest unit; never zero.
        max_amount: Amount,
    },
    /// Fee paid in the chain's native unit, amount set by the chain.
    Native,
}

impl PaymentStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            PaymentStrategy::Sponsored => StrategyKind::Sponsored,
            PaymentStrategy::AssetPaid { .. } => StrategyKind::AssetPaid,
            PaymentStrategy::Native => StrategyKind::Native,
        }
    }

    pub fn is_sponsored(&self) -> bool {
        matches!(self, PaymentStrategy::Sponsored)
    }

    /// The asset the fee is paid in, when it is not native.
    pub fn fee_asset(&self) -> Option<&FeeAsset> {
        match self {
            PaymentStrategy::AssetPaid { asset, .. } => Some(asset),
            _ => None,
        }
    }

    /// The capped fee amount, when the engine computed one.
    pub fn fee_amount(&self) -> Option<Amount> {
        match self {
            PaymentStrategy::AssetPaid { max_amount, .. } => Some(*max_amount),
            _ => None,
        }
    }
}

/// Discriminant of [`PaymentStrategy`], used for labels and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Sponsored,
    AssetPaid,
    Native,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Sponsored => "sponsored",
            StrategyKind::AssetPaid => "asset_paid",
            StrategyKind::Native => "native",
        }
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "asset")]
pub enum UserPreference {
    Sponsored,
    AssetPaid(FeeAsset),
    Native,
}

/// A payment option that can be offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOption {
    /// The preference to pass back to the selector if chosen.
    pub preference: UserPreference,
    /// Fee cap the option would carry, for asset-paid options.
    pub estimated_amount: Option<Amount>,
}

/// Errors raised while computing costs or selecting a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotingError {
    /// No quote exists for the asset the cost was requested in.
    #[error("no price quote for asset {0}")]
    UnknownAsset(ChainAddress),

    /// The preferred asset is not in the current price table.
    #[error("asset {0} is not accepted for fee payment")]
    UnsupportedAsset(ChainAddress),

    /// Sponsorship was requested but the transaction is not eligible.
    #[error("sponsorship is not available for this transaction")]
    SponsorshipUnavailable,
}

impl QuotingError {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotingError::UnknownAsset(_) => "unknown_asset",
            QuotingError::UnsupportedAsset(_) => "unsupported_asset",
            QuotingError::SponsorshipUnavailable => "sponsorship_unavailable",
        }
    }
}
