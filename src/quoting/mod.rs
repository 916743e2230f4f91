//! Fee cost computation and payment strategy selection.

pub mod cost;
pub mod selector;
pub mod types;

pub use cost::{cost_in_asset, with_buffer, GasEstimate, DEFAULT_BUFFER_BPS};
pub use selector::StrategySelector;
pub use types::{PaymentStrategy, QuotingError, StrategyKind, StrategyOption, UserPreference};
