//! Sponsorship eligibility source.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::blockchain::types::{ChainAddress, TransactionKind};
use crate::config::schema::SponsorshipConfig;

/// Operator policy deciding whether a transaction's fee may be sponsored.
#[async_trait]
pub trait EligibilitySource: Send + Sync {
    /// Whether `account` may have a transaction of `kind` sponsored.
    async fn is_sponsorship_eligible(&self, kind: &TransactionKind, account: ChainAddress) -> bool;
}

/// Policy that sponsors a fixed set of transaction kinds for every account.
#[derive(Debug, Clone, Default)]
pub struct StaticEligibility {
    kinds: HashSet<TransactionKind>,
}

impl StaticEligibility {
    /// Build from configuration.
    pub fn from_config(config: &SponsorshipConfig) -> Self {
        Self {
            kinds: config
                .eligible_kinds
                .iter()
                .map(|kind| TransactionKind::from(kind.as_str()))
                .collect(),
        }
    }

    /// A policy that never sponsors.
    pub fn none() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EligibilitySource for StaticEligibility {
    async fn is_sponsorship_eligible(&self, kind: &TransactionKind, account: ChainAddress) -> bool {
        let eligible = self.kinds.contains(kind);
        tracing::debug!(kind = %kind, account = %account, eligible, "Sponsorship eligibility checked");
        eligible
    }
}
