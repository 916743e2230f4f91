//! Price table subsystem.
//!
//! # Data Flow
//! ```text
//! fee-abstraction relay
//!     → source.rs (HTTP fetch, timeout, failover)
//!     → feed.rs (complete table for the configured assets)
//!     → book.rs (atomic swap of an immutable snapshot; stale on failure)
//!     → quoting (read-only)
//! ```

pub mod book;
pub mod feed;
pub mod source;
pub mod types;

pub use book::{PriceBook, PriceSnapshot};
pub use feed::PriceFeed;
pub use source::{PriceSource, RelayPriceSource};
pub use types::{FeeAsset, FetchError, PriceQuote, PriceTable};
