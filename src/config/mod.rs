//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (GRAFANA_* environment overrides)
//!     → validation.rs (semantic checks)
//!     → AdapterConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::AdapterConfig;
pub use schema::DatasourceConfig;
pub use schema::GrafanaConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::TimeoutConfig;
pub use schema::TlsConfig;
