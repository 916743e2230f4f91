//! Price source client with timeout and failover.
//!
//! # Responsibilities
//! - Ask the fee-abstraction relay for native-unit prices of fee assets
//! - Enforce a per-request timeout and fail over across relay endpoints
//! - Decode decimal-string amounts exactly (no floating point)

use alloy::primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::ChainAddress;
use crate::config::schema::PriceSourceConfig;
use crate::pricing::types::{FetchError, PriceQuote};

/// External source of fee-asset prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch a quote for each of `assets`.
    async fn fetch_prices(&self, assets: &[ChainAddress]) -> Result<Vec<PriceQuote>, FetchError>;
}

/// Request body sent to the relay.
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceRequest {
    pub assets: Vec<ChainAddress>,
}

/// Response body returned by the relay.
#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponse {
    pub quotes: Vec<WireQuote>,
}

/// A quote as it travels over the wire; the price is a base-10 string.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireQuote {
    pub asset: ChainAddress,
    pub native_unit_price: String,
}

impl WireQuote {
    fn decode(self) -> Result<PriceQuote, FetchError> {
        let price = U256::from_str_radix(self.native_unit_price.trim(), 10).map_err(|e| {
            FetchError::Malformed(format!(
                "price '{}' for {} is not a base-10 integer: {}",
                self.native_unit_price, self.asset, e
            ))
        })?;
        Ok(PriceQuote::new(self.asset, price))
    }
}

/// HTTP client for the fee-abstraction relay's price endpoint.
#[derive(Clone)]
pub struct RelayPriceSource {
    http: reqwest::Client,
    /// Primary endpoint followed by failovers.
    endpoints: Vec<url::Url>,
    timeout_duration: Duration,
}

impl RelayPriceSource {
    /// Create a client from configuration.
    ///
    /// Fails if the primary URL does not parse; invalid failover URLs are skipped.
    pub fn new(config: &PriceSourceConfig) -> Result<Self, FetchError> {
        let primary = url::Url::parse(&config.url).map_err(|e| {
            FetchError::Unreachable(format!("invalid price source URL '{}': {}", config.url, e))
        })?;

        let mut endpoints = vec![primary];
        for raw in &config.failover_urls {
            match url::Url::parse(raw) {
                Ok(url) => endpoints.push(url),
                Err(_) => tracing::warn!(url = %raw, "Ignoring invalid failover price source URL"),
            }
        }

        Ok(Self {
            http: reqwest::Client::new(),
            endpoints,
            timeout_duration: Duration::from_secs(config.timeout_secs),
        })
    }

    async fn fetch_from(&self, endpoint: &url::Url, request: &PriceRequest) -> Result<Vec<PriceQuote>, FetchError> {
        let send = self.http.post(endpoint.clone()).json(request).send();
        let response = match timeout(self.timeout_duration, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(FetchError::Unreachable(e.to_string())),
            Err(_) => return Err(FetchError::Timeout(self.timeout_duration.as_secs())),
        };

        if !response.status().is_success() {
            return Err(FetchError::Unreachable(format!("relay answered {}", response.status())));
        }

        let body = match timeout(self.timeout_duration, response.json::<PriceResponse>()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => return Err(FetchError::Malformed(e.to_string())),
            Err(_) => return Err(FetchError::Timeout(self.timeout_duration.as_secs())),
        };

        body.quotes.into_iter().map(WireQuote::decode).collect()
    }
}

#[async_trait]
impl PriceSource for RelayPriceSource {
    async fn fetch_prices(&self, assets: &[ChainAddress]) -> Result<Vec<PriceQuote>, FetchError> {
        let request = PriceRequest {
            assets: assets.to_vec(),
        };

        let mut last_error = FetchError::Unreachable("no price source endpoints configured".to_string());
        for (i, endpoint) in self.endpoints.iter().enumerate() {
            match self.fetch_from(endpoint, &request).await {
                Ok(quotes) => return Ok(quotes),
                Err(e) => {
                    tracing::warn!(endpoint_idx = i, error = %e, "Price source failed, trying next endpoint");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

impl std::fmt::Debug for RelayPriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayPriceSource")
            .field("endpoints", &self.endpoints.len())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
