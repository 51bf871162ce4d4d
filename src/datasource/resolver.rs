//! Resolver trait and the static, config-backed implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::{AdapterConfig, DatasourceConfig};
use crate::datasource::grafana::GrafanaResolver;
use crate::error::{TempoError, TempoResult};

/// Connection details for one Tempo datasource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datasource {
    pub uid: String,
    pub name: Option<String>,
    /// URL under which the Tempo HTTP API is served.
    pub base_url: String,
}

/// Maps an opaque datasource UID to connection details.
#[async_trait]
pub trait DatasourceResolver: Send + Sync {
    /// Fails with [`TempoError::DatasourceNotFound`] for unknown UIDs.
    async fn resolve(&self, uid: &str) -> TempoResult<Datasource>;
}

/// Fixed set of datasources known up front.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    datasources: HashMap<String, Datasource>,
}

impl StaticResolver {
    pub fn new(datasources: impl IntoIterator<Item = Datasource>) -> Self {
        Self {
            datasources: datasources
                .into_iter()
                .map(|ds| (ds.uid.clone(), ds))
                .collect(),
        }
    }

    pub fn from_config(configs: &[DatasourceConfig]) -> Self {
        Self::new(configs.iter().map(|c| Datasource {
            uid: c.uid.clone(),
            name: c.name.clone(),
            base_url: c.url.clone(),
        }))
    }

    pub fn len(&self) -> usize {
        self.datasources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasources.is_empty()
    }
}

#[async_trait]
impl DatasourceResolver for StaticResolver {
    async fn resolve(&self, uid: &str) -> TempoResult<Datasource> {
        self.datasources
            .get(uid)
            .cloned()
            .ok_or_else(|| TempoError::DatasourceNotFound(uid.to_string()))
    }
}

/// Static datasources when configured, otherwise Grafana lookups.
pub fn resolver_from_config(
    config: &AdapterConfig,
    http: Client,
) -> Arc<dyn DatasourceResolver> {
    if config.datasources.is_empty() {
        tracing::info!(grafana_url = %config.grafana.url, "Resolving datasources through Grafana");
        Arc::new(GrafanaResolver::new(http, &config.grafana.url))
    } else {
        tracing::info!(count = config.datasources.len(), "Using static datasources");
        Arc::new(StaticResolver::from_config(&config.datasources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_resolve() {
        let resolver = StaticResolver::from_config(&[DatasourceConfig {
            uid: "tempo".to_string(),
            url: "http://tempo:3200".to_string(),
            name: Some("Tempo".to_string()),
        }]);
        assert_eq!(resolver.len(), 1);

        let ds = resolver.resolve("tempo").await.unwrap();
        assert_eq!(ds.base_url, "http://tempo:3200");
        assert_eq!(ds.name.as_deref(), Some("Tempo"));

        let err = resolver.resolve("loki").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("loki"));
    }

    #[tokio::test]
    async fn test_uid_lookup_is_exact() {
        let resolver = StaticResolver::new([Datasource {
            uid: "Tempo".to_string(),
            name: None,
            base_url: "http://tempo:3200".to_string(),
        }]);
        assert!(resolver.resolve("tempo").await.is_err());
        assert!(resolver.resolve("Tempo").await.is_ok());
    }
}
