//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the adapter.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the Tempo query adapter.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdapterConfig {
    /// Grafana instance used to resolve and proxy datasources.
    pub grafana: GrafanaConfig,

    /// Statically configured Tempo datasources.
    /// When non-empty, these are used instead of Grafana lookups.
    pub datasources: Vec<DatasourceConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Grafana connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GrafanaConfig {
    /// Base URL (e.g., "http://localhost:3000").
    pub url: String,

    /// Service account token or API key, sent as a Bearer token.
    pub api_key: Option<String>,

    /// On-behalf-of access token; takes precedence over `api_key`.
    pub access_token: Option<String>,

    /// ID token forwarded alongside `access_token`.
    pub id_token: Option<String>,

    /// Optional TLS settings for Grafana and Tempo connections.
    pub tls: Option<TlsConfig>,
}

impl Default for GrafanaConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000".to_string(),
            api_key: None,
            access_token: None,
            id_token: None,
            tls: None,
        }
    }
}

/// Client-side TLS configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Extra CA bundle to trust (PEM).
    pub ca_path: Option<String>,

    /// Client certificate for mutual TLS (PEM).
    pub cert_path: Option<String>,

    /// Private key matching `cert_path` (PEM).
    pub key_path: Option<String>,

    /// Accept any server certificate.
    pub skip_verify: bool,
}

/// A Tempo datasource reachable without Grafana.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasourceConfig {
    /// Identifier callers pass as `datasourceUid`.
    pub uid: String,

    /// Tempo base URL (e.g., "http://tempo:3200").
    pub url: String,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (send + body read) in seconds, at most 30.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Register metric descriptions with the host's recorder.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
        }
    }
}
