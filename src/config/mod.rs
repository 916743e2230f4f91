//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or value built in code
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EngineConfig (validated, immutable)
//!     → passed to FeeEngine::new
//! ```
//!
//! # Design Decisions
//! - Config is an explicit value, never global state; test and production
//!   configurations can coexist in one process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    EngineConfig, FeeConfig, ObservabilityConfig, PriceSourceConfig, SponsorshipConfig, SubmissionConfig,
};
pub use validation::{validate_config, ValidationError};
