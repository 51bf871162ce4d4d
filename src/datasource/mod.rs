//! Datasource resolution.
//!
//! # Data Flow
//! ```text
//! datasourceUid (opaque, from the caller)
//!     → DatasourceResolver::resolve
//!         StaticResolver  (config [[datasources]])
//!         GrafanaResolver (GET /api/datasources/uid/{uid}, then proxy URL)
//!     → Datasource { uid, name, base_url }
//!     → TempoClient bound to base_url
//! ```

pub mod grafana;
pub mod resolver;

pub use grafana::GrafanaResolver;
pub use resolver::{resolver_from_config, Datasource, DatasourceResolver, StaticResolver};
