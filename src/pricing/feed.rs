//! Complete price table refresh for the configured asset list.

use std::sync::Arc;

use crate::blockchain::types::ChainAddress;
use crate::pricing::source::PriceSource;
use crate::pricing::types::{FeeAsset, FetchError, PriceTable};

/// Fetches complete price tables for a fixed set of accepted assets.
#[derive(Clone)]
pub struct PriceFeed {
    source: Arc<dyn PriceSource>,
    assets: Arc<[FeeAsset]>,
}

impl PriceFeed {
    pub fn new(source: Arc<dyn PriceSource>, assets: impl Into<Arc<[FeeAsset]>>) -> Self {
        Self {
            source,
            assets: assets.into(),
        }
    }

    /// Configured assets, in configuration order.
    pub fn assets(&self) -> &[FeeAsset] {
        &self.assets
    }

    /// Fetch a table covering every configured asset.
    ///
    /// Partial, duplicated or foreign quotes fail the whole refresh so that a
    /// caller never mixes stale and fresh prices.
    pub async fn refresh(&self) -> Result<PriceTable, FetchError> {
        let addresses: Vec<ChainAddress> = self.assets.iter().map(|asset| asset.address).collect();
        let quotes = self.source.fetch_prices(&addresses).await?;
        PriceTable::from_quotes(&self.assets, quotes)
    }
}

impl std::fmt::Debug for PriceFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceFeed").field("assets", &self.assets.len()).finish()
    }
}
