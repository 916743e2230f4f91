//! Exact conversion of native gas estimates into fee-asset amounts.
//!
//! All arithmetic is checked integer arithmetic on [`Amount`]. Overflow means
//! the configuration is wrong (e.g., a price scaled with the wrong decimals)
//! and panics instead of returning a truncated fee.

use alloy::primitives::U256;

use crate::blockchain::types::Amount;
use crate::pricing::types::{FeeAsset, PriceQuote};
use crate::quoting::types::QuotingError;

/// Predicted fee of a pending transaction, in native gas units.
pub type GasEstimate = Amount;

/// Default headroom on top of the computed cost: 10%.
pub const DEFAULT_BUFFER_BPS: u32 = 1_000;

/// Basis points in 100%.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Cost of `estimate` native gas units in `asset`'s smallest denomination.
///
/// Fails with [`QuotingError::UnknownAsset`] when there is no quote, or the
/// quote belongs to another asset. A zero estimate costs zero.
///
/// # Panics
/// If the product does not fit in 256 bits.
pub fn cost_in_asset(
    estimate: GasEstimate,
    quote: Option<&PriceQuote>,
    asset: &FeeAsset,
) -> Result<Amount, QuotingError> {
    let quote = quote
        .filter(|quote| quote.asset_address == asset.address)
        .ok_or(QuotingError::UnknownAsset(asset.address))?;

    let cost = estimate.checked_mul(quote.native_unit_price).unwrap_or_else(|| {
        panic!(
            "fee cost overflow: estimate {} * price {} for {} ({} decimals)",
            estimate, quote.native_unit_price, asset.symbol, asset.decimals
        )
    });
    Ok(cost)
}

/// Inflate `cost` by `buffer_bps` basis points, truncating the added part.
///
/// `with_buffer(cost, 1000) == cost + cost / 10`.
///
/// # Panics
/// If the buffered amount does not fit in 256 bits.
pub fn with_buffer(cost: Amount, buffer_bps: u32) -> Amount {
    let bps = U256::from(buffer_bps);
    let denominator = U256::from(BPS_DENOMINATOR);

    // floor(cost * bps / D) == q * bps + floor(r * bps / D) for cost = q * D + r
    let (q, r) = cost.div_rem(denominator);
    let buffered = q
        .checked_mul(bps)
        .and_then(|whole| whole.checked_add(r * bps / denominator))
        .and_then(|extra| cost.checked_add(extra));

    buffered.unwrap_or_else(|| panic!("fee buffer overflow: cost {} with {} bps", cost, buffer_bps))
}
