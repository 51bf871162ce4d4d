//! Read-only query adapter for Tempo tracing datasources.
//!
//! Exposes four operations (trace search, trace fetch, tag name listing and
//! tag value listing) against a Tempo HTTP API reached directly or through
//! the Grafana datasource proxy.

pub mod config;
pub mod datasource;
pub mod error;
pub mod normalize;
pub mod observability;
pub mod query;
pub mod resilience;
pub mod tools;
pub mod transport;

pub use config::schema::AdapterConfig;
pub use datasource::{Datasource, DatasourceResolver, GrafanaResolver, StaticResolver};
pub use error::{ErrorKind, Operation, TempoError, TempoResult};
pub use tools::TempoTools;
