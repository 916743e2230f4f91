//! Engine facade wiring prices, selection and lifecycle tracking.
//!
//! # Data Flow
//! ```text
//! refresh_prices() → PriceBook (snapshot swap)
//! select(kind, account, preference, estimate)
//!     → EligibilitySource (sponsorship policy)
//!     → StrategySelector (against the current snapshot)
//! tracker() → TransactionTracker (one per attempt, shared submitter)
//! ```

use std::sync::Arc;

use crate::blockchain::eligibility::EligibilitySource;
use crate::blockchain::submitter::Submitter;
use crate::blockchain::types::{ChainAddress, TransactionKind};
use crate::config::loader::ConfigError;
use crate::config::schema::EngineConfig;
use crate::config::validation::validate_config;
use crate::observability::metrics;
use crate::payments::tracker::TransactionTracker;
use crate::pricing::book::{PriceBook, PriceSnapshot};
use crate::pricing::feed::PriceFeed;
use crate::pricing::source::PriceSource;
use crate::pricing::types::{FeeAsset, FetchError};
use crate::quoting::cost::GasEstimate;
use crate::quoting::selector::StrategySelector;
use crate::quoting::types::{PaymentStrategy, QuotingError, StrategyOption, UserPreference};

/// Cloneable handle over one engine configuration.
#[derive(Clone)]
pub struct FeeEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    config: EngineConfig,
    prices: PriceBook,
    selector: StrategySelector,
    eligibility: Arc<dyn EligibilitySource>,
    submitter: Arc<dyn Submitter>,
}

impl FeeEngine {
    /// Build an engine after validating `config`.
    ///
    /// Prices start empty and stale until the first successful refresh.
    pub fn new(
        config: EngineConfig,
        price_source: Arc<dyn PriceSource>,
        eligibility: Arc<dyn EligibilitySource>,
        submitter: Arc<dyn Submitter>,
    ) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let feed = PriceFeed::new(price_source, config.assets.clone());
        let selector = StrategySelector::new(config.fees.buffer_bps);

        tracing::info!(
            assets = config.assets.len(),
            buffer_bps = config.fees.buffer_bps,
            timeout_secs = config.submission.timeout_secs,
            "Fee engine initialized"
        );

        Ok(Self {
            inner: Arc::new(EngineInner {
                prices: PriceBook::new(feed),
                selector,
                eligibility,
                submitter,
                config,
            }),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    /// Fetch fresh prices; on failure the previous table stays in service.
    pub async fn refresh_prices(&self) -> Result<Arc<PriceSnapshot>, FetchError> {
        self.inner.prices.refresh().await
    }

    pub fn prices(&self) -> Arc<PriceSnapshot> {
        self.inner.prices.snapshot()
    }

    pub fn prices_stale(&self) -> bool {
        self.inner.prices.is_stale()
    }

    /// Options offerable for this transaction, in presentation order.
    pub async fn options(
        &self,
        kind: &TransactionKind,
        account: ChainAddress,
        gas_estimate: GasEstimate,
    ) -> Vec<StrategyOption> {
        let eligible = self.inner.eligibility.is_sponsorship_eligible(kind, account).await;
        let snapshot = self.prices();
        self.inner
            .selector
            .available(eligible, &self.inner.config.assets, gas_estimate, &snapshot.table)
    }

    /// Resolve the user's preference against current eligibility and prices.
    ///
    /// An asset-paid preference is matched by address against the configured
    /// assets, and the configured symbol and decimals are used from then on.
    pub async fn select(
        &self,
        kind: &TransactionKind,
        account: ChainAddress,
        preference: &UserPreference,
        gas_estimate: GasEstimate,
    ) -> Result<PaymentStrategy, QuotingError> {
        let (eligible, preference) = match preference {
            UserPreference::Sponsored => (
                self.inner.eligibility.is_sponsorship_eligible(kind, account).await,
                UserPreference::Sponsored,
            ),
            UserPreference::AssetPaid(requested) => match self.asset(&requested.address) {
                Some(configured) => (false, UserPreference::AssetPaid(configured.clone())),
                None => {
                    let err = QuotingError::UnsupportedAsset(requested.address);
                    metrics::record_selection_rejected(&err);
                    tracing::debug!(asset = %requested.address, "Preferred fee asset is not configured");
                    return Err(err);
                }
            },
            UserPreference::Native => (false, UserPreference::Native),
        };
        let snapshot = self.prices();
        self.inner.selector.select(eligible, &preference, gas_estimate, &snapshot.table)
    }

    /// A fresh idle tracker for a new attempt.
    pub fn tracker(&self) -> TransactionTracker {
        TransactionTracker::new(self.inner.submitter.clone(), &self.inner.config.submission)
    }

    pub fn asset(&self, address: &ChainAddress) -> Option<&FeeAsset> {
        self.inner.config.asset(address)
    }

    pub fn asset_by_symbol(&self, symbol: &str) -> Option<&FeeAsset> {
        self.inner.config.assets.iter().find(|a| a.symbol.eq_ignore_ascii_case(symbol))
    }
}

impl std::fmt::Debug for FeeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeEngine")
            .field("assets", &self.inner.config.assets.len())
            .field("buffer_bps", &self.inner.selector.buffer_bps())
            .field("prices_stale", &self.prices_stale())
            .finish()
    }
}
