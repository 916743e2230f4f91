//! Last-known-good price snapshot with atomic replacement.
//!
//! # Responsibilities
//! - Hold the current price table as an immutable snapshot
//! - Swap in a complete new snapshot on successful refresh
//! - Keep serving the previous table and flag it stale on failure
//!
//! # Design Decisions
//! - Readers load an `Arc<PriceSnapshot>` and never observe a partial table
//! - No retry loop; callers re-invoke `refresh` when they choose

use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::observability::metrics;
use crate::pricing::feed::PriceFeed;
use crate::pricing::types::{FetchError, PriceTable};

/// An immutable view of prices at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSnapshot {
    /// The complete table.
    pub table: Arc<PriceTable>,
    /// Unix seconds of the refresh that produced `table`, if any succeeded.
    pub fetched_at: Option<u64>,
    /// Set when the latest refresh failed and `table` is the previous one.
    pub stale: bool,
}

impl PriceSnapshot {
    fn initial() -> Self {
        Self {
            table: Arc::new(PriceTable::empty()),
            fetched_at: None,
            stale: true,
        }
    }
}

/// Holder of the current price snapshot.
#[derive(Debug)]
pub struct PriceBook {
    feed: PriceFeed,
    current: ArcSwap<PriceSnapshot>,
}

impl PriceBook {
    /// Create a book with an empty, stale snapshot.
    pub fn new(feed: PriceFeed) -> Self {
        Self {
            feed,
            current: ArcSwap::from_pointee(PriceSnapshot::initial()),
        }
    }

    /// The snapshot readers should use right now.
    pub fn snapshot(&self) -> Arc<PriceSnapshot> {
        self.current.load_full()
    }

    /// Whether the served prices are not from the latest refresh attempt.
    pub fn is_stale(&self) -> bool {
        self.current.load().stale
    }

    /// The feed this book refreshes from.
    pub fn feed(&self) -> &PriceFeed {
        &self.feed
    }

    /// Fetch fresh prices and swap them in.
    ///
    /// On failure the previous table stays in place, marked stale, and the
    /// error is returned so the caller can surface a warning.
    pub async fn refresh(&self) -> Result<Arc<PriceSnapshot>, FetchError> {
        let started = Instant::now();
        let result = self.feed.refresh().await;
        metrics::record_price_refresh(result.is_ok(), started.elapsed());

        match result {
            Ok(table) => {
                let snapshot = Arc::new(PriceSnapshot {
                    table: Arc::new(table),
                    fetched_at: Some(unix_now()),
                    stale: false,
                });
                self.current.store(snapshot.clone());
                tracing::info!(assets = snapshot.table.len(), "Price table refreshed");
                Ok(snapshot)
            }
            Err(e) => {
                // Flag whatever snapshot is current at swap time.
                let previous = self.current.rcu(|current| PriceSnapshot {
                    stale: true,
                    ..(**current).clone()
                });
                tracing::warn!(
                    error = %e,
                    fetched_at = ?previous.fetched_at,
                    "Price refresh failed, serving stale prices"
                );
                Err(e)
            }
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::ChainAddress;
    use crate::pricing::source::PriceSource;
    use crate::pricing::types::{FeeAsset, PriceQuote};
    use alloy::primitives::{address, U256};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Source that answers with a fixed price until switched off.
    struct Switchable {
        up: AtomicBool,
        asset: FeeAsset,
    }

    #[async_trait]
    impl PriceSource for Switchable {
        async fn fetch_prices(&self, _assets: &[ChainAddress]) -> Result<Vec<PriceQuote>, FetchError> {
            if self.up.load(Ordering::SeqCst) {
                Ok(vec![PriceQuote::new(self.asset.address, U256::from(3))])
            } else {
                Err(FetchError::Unreachable("down".to_string()))
            }
        }
    }

    fn book() -> (PriceBook, Arc<Switchable>) {
        let asset = FeeAsset::new("USDC", address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913"), 6);
        let source = Arc::new(Switchable {
            up: AtomicBool::new(true),
            asset: asset.clone(),
        });
        let feed = PriceFeed::new(source.clone(), vec![asset]);
        (PriceBook::new(feed), source)
    }

    #[tokio::test]
    async fn test_starts_empty_and_stale() {
        let (book, _) = book();
        let snapshot = book.snapshot();
        assert!(snapshot.table.is_empty());
        assert!(snapshot.stale);
        assert!(snapshot.fetched_at.is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_known_good() {
        let (book, source) = book();
        let fresh = book.refresh().await.unwrap();
        assert!(!book.is_stale());
        assert_eq!(fresh.table.len(), 1);

        source.up.store(false, Ordering::SeqCst);
        assert!(book.refresh().await.is_err());

        let served = book.snapshot();
        assert!(served.stale);
        assert_eq!(served.table, fresh.table);
        assert_eq!(served.fetched_at, fresh.fetched_at);

        // A reader holding the old snapshot is unaffected by the swap.
        assert!(!fresh.stale);

        source.up.store(true, Ordering::SeqCst);
        book.refresh().await.unwrap();
        assert!(!book.is_stale());
    }

    /// First call quotes 1, the call numbered `success_at` quotes 2, all others fail.
    struct Sequenced {
        calls: AtomicUsize,
        success_at: usize,
        asset: FeeAsset,
    }

    #[async_trait]
    impl PriceSource for Sequenced {
        async fn fetch_prices(&self, _assets: &[ChainAddress]) -> Result<Vec<PriceQuote>, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            match call {
                0 => Ok(vec![PriceQuote::new(self.asset.address, U256::from(1))]),
                n if n == self.success_at => Ok(vec![PriceQuote::new(self.asset.address, U256::from(2))]),
                _ => Err(FetchError::Timeout(1)),
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_failures_keep_newer_table() {
        let asset = FeeAsset::new("USDC", address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913"), 6);

        for _ in 0..20 {
            let source = Arc::new(Sequenced {
                calls: AtomicUsize::new(0),
                success_at: 16,
                asset: asset.clone(),
            });
            let book = Arc::new(PriceBook::new(PriceFeed::new(source, vec![asset.clone()])));
            book.refresh().await.unwrap();

            let tasks: Vec<_> = (0..32)
                .map(|_| {
                    let book = book.clone();
                    tokio::spawn(async move {
                        let _ = book.refresh().await;
                    })
                })
                .collect();
            for task in tasks {
                task.await.unwrap();
            }

            let served = book.snapshot();
            assert_eq!(served.table.get(&asset.address).unwrap().native_unit_price, U256::from(2));
        }
    }
}
