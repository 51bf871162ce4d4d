//! Grafana-backed datasource resolution.
//!
//! # Responsibilities
//! - Confirm the datasource exists via the Grafana datasource API
//! - Route Tempo calls through Grafana's datasource proxy
//!
//! The supplied client must already carry Grafana credentials.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::datasource::resolver::{Datasource, DatasourceResolver};
use crate::error::{TempoError, TempoResult};
use crate::query::append_segments;
use crate::query::builder::path_segment;
use crate::resilience::timeouts::{with_deadline, MAX_REQUEST_DURATION};
use crate::transport::limits::read_capped;

/// Datasource metadata bodies are small; anything past this is ignored.
const METADATA_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Deserialize)]
struct DatasourceModel {
    #[serde(default)]
    uid: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
}

/// Resolves UIDs against a Grafana instance.
#[derive(Debug, Clone)]
pub struct GrafanaResolver {
    http: Client,
    grafana_url: String,
}

impl GrafanaResolver {
    pub fn new(http: Client, grafana_url: &str) -> Self {
        Self {
            http,
            grafana_url: grafana_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL of the Tempo API behind Grafana's datasource proxy.
    pub fn proxy_url(&self, uid: &str) -> TempoResult<String> {
        append_segments(
            &self.grafana_url,
            ["api", "datasources", "proxy", "uid", uid],
        )
        .map(String::from)
    }

    async fn lookup(&self, uid: &str) -> TempoResult<DatasourceModel> {
        let url = append_segments(&self.grafana_url, ["api", "datasources", "uid", uid])?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = read_capped(response, METADATA_LIMIT).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(TempoError::DatasourceNotFound(uid.to_string()));
        }
        if !status.is_success() {
            return Err(TempoError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body.bytes).into_owned(),
            });
        }

        serde_json::from_slice(&body.bytes).map_err(|e| {
            TempoError::Config(format!("decoding datasource '{}': {}", uid, e))
        })
    }
}

#[async_trait]
impl DatasourceResolver for GrafanaResolver {
    async fn resolve(&self, uid: &str) -> TempoResult<Datasource> {
        let uid = path_segment("datasourceUid", uid)?;
        let model = with_deadline(MAX_REQUEST_DURATION, self.lookup(uid)).await?;

        if model.kind != "tempo" {
            tracing::warn!(
                datasource_uid = %uid,
                datasource_type = %model.kind,
                "Datasource is not a Tempo datasource"
            );
        }
        if !model.uid.is_empty() && model.uid != uid {
            tracing::debug!(requested = %uid, returned = %model.uid, "Datasource UID differs");
        }

        Ok(Datasource {
            uid: uid.to_string(),
            name: model.name,
            base_url: self.proxy_url(uid)?,
        })
    }
}
