//! Fee asset and price table types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::blockchain::types::{Amount, ChainAddress};

/// An accepted fee-payment asset.
///
/// Identity is the token address; symbol and decimals are descriptive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeAsset {
    /// Ticker shown to users (e.g., "USDC").
    pub symbol: String,
    /// Token contract address.
    pub address: ChainAddress,
    /// Decimal precision of the token's smallest unit.
    pub decimals: u8,
}

impl FeeAsset {
    pub fn new(symbol: impl Into<String>, address: ChainAddress, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }
}

impl PartialEq for FeeAsset {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for FeeAsset {}

impl Hash for FeeAsset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

/// Price of one native gas unit in an asset's smallest denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub asset_address: ChainAddress,
    pub native_unit_price: Amount,
}

impl PriceQuote {
    pub fn new(asset_address: ChainAddress, native_unit_price: Amount) -> Self {
        Self {
            asset_address,
            native_unit_price,
        }
    }
}

/// Errors raised while refreshing prices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No price source endpoint answered.
    #[error("price source unreachable: {0}")]
    Unreachable(String),

    /// The price source did not answer in time.
    #[error("price source timed out after {0} seconds")]
    Timeout(u64),

    /// The response could not be decoded.
    #[error("malformed price response: {0}")]
    Malformed(String),

    /// A configured asset was missing from the response.
    #[error("no quote for configured asset {0}")]
    MissingQuote(ChainAddress),

    /// The response quoted an asset that is not configured.
    #[error("quote for unknown asset {0}")]
    UnknownQuote(ChainAddress),

    /// The response quoted the same asset twice.
    #[error("duplicate quote for asset {0}")]
    DuplicateQuote(ChainAddress),
}

/// Immutable mapping from asset address to its quote.
///
/// A table built by [`PriceTable::from_quotes`] covers every configured asset
/// and nothing else. Tables are replaced wholesale, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    quotes: HashMap<ChainAddress, PriceQuote>,
}

impl PriceTable {
    /// A table with no quotes, served before the first successful refresh.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a complete table for `assets` from a price source response.
    pub fn from_quotes(assets: &[FeeAsset], quotes: Vec<PriceQuote>) -> Result<Self, FetchError> {
        let mut table = HashMap::with_capacity(quotes.len());
        for quote in quotes {
            if !assets.iter().any(|asset| asset.address == quote.asset_address) {
                return Err(FetchError::UnknownQuote(quote.asset_address));
            }
            if table.insert(quote.asset_address, quote).is_some() {
                return Err(FetchError::DuplicateQuote(quote.asset_address));
            }
        }

        if let Some(missing) = assets.iter().find(|asset| !table.contains_key(&asset.address)) {
            return Err(FetchError::MissingQuote(missing.address));
        }

        Ok(Self { quotes: table })
    }

    /// Quote for the asset at `address`.
    pub fn get(&self, address: &ChainAddress) -> Option<&PriceQuote> {
        self.quotes.get(address)
    }

    pub fn contains(&self, address: &ChainAddress) -> bool {
        self.quotes.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceQuote> {
        self.quotes.values()
    }
}
