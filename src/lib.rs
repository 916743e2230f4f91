//! Transaction fee payment-strategy engine.
//!
//! Decides how a transaction's network fee is paid (sponsored, in a fee
//! asset through a relay, or natively), computes the capped fee amount and
//! tracks the submission to a terminal outcome.

pub mod blockchain;
pub mod config;
pub mod engine;
pub mod observability;
pub mod payments;
pub mod presenter;
pub mod pricing;
pub mod quoting;

pub use config::schema::EngineConfig;
pub use engine::FeeEngine;
pub use payments::{FailureReason, TransactionRecord, TransactionState, TransactionTracker};
pub use presenter::{present, StatusView};
pub use pricing::{FeeAsset, PriceTable};
pub use quoting::{PaymentStrategy, StrategySelector, UserPreference};
