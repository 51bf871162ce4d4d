//! Construction of the authenticated reqwest client used by the binary.
//!
//! Library callers may pass any `reqwest::Client`; this is the default
//! wiring from [`AdapterConfig`].

use std::fs;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Certificate, Client, ClientBuilder, Identity};

use crate::config::{AdapterConfig, TlsConfig};
use crate::error::{TempoError, TempoResult};
use crate::resilience::timeouts::effective_deadline;

/// Header carrying the Grafana ID token alongside an access token.
pub const ID_TOKEN_HEADER: &str = "X-Grafana-Id";

/// Default headers for Grafana authentication. The access token takes
/// precedence over the API key.
pub fn auth_headers(config: &AdapterConfig) -> TempoResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let grafana = &config.grafana;

    let bearer = grafana
        .access_token
        .as_deref()
        .or(grafana.api_key.as_deref())
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| TempoError::Config(format!("invalid token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    if let (Some(_), Some(id_token)) = (&grafana.access_token, &grafana.id_token) {
        let mut value = HeaderValue::from_str(id_token)
            .map_err(|e| TempoError::Config(format!("invalid id token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(ID_TOKEN_HEADER, value);
    }

    Ok(headers)
}

fn read_pem(path: &str) -> TempoResult<Vec<u8>> {
    fs::read(path).map_err(|e| TempoError::Config(format!("reading '{}': {}", path, e)))
}

/// Apply CA trust, client identity and verification settings.
pub fn apply_tls(mut builder: ClientBuilder, tls: &TlsConfig) -> TempoResult<ClientBuilder> {
    if let Some(ca_path) = &tls.ca_path {
        let ca = Certificate::from_pem(&read_pem(ca_path)?)
            .map_err(|e| TempoError::Config(format!("invalid CA bundle '{}': {}", ca_path, e)))?;
        builder = builder.add_root_certificate(ca);
    }

    if let (Some(cert_path), Some(key_path)) = (&tls.cert_path, &tls.key_path) {
        let mut pem = read_pem(cert_path)?;
        pem.push(b'\n');
        pem.extend(read_pem(key_path)?);
        let identity = Identity::from_pem(&pem).map_err(|e| {
            TempoError::Config(format!("invalid client certificate '{}': {}", cert_path, e))
        })?;
        builder = builder.identity(identity);
    }

    if tls.skip_verify {
        tracing::warn!("TLS certificate verification is disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder)
}

/// Build a reqwest client with auth headers, TLS settings and configured
/// timeouts.
pub fn build_http_client(config: &AdapterConfig) -> TempoResult<Client> {
    let timeout = effective_deadline(Duration::from_secs(config.timeouts.request_secs));

    let mut builder = Client::builder()
        .use_rustls_tls()
        .default_headers(auth_headers(config)?)
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .timeout(timeout)
        .user_agent(format!("tempo-query/{}", env!("CARGO_PKG_VERSION")));

    if let Some(tls) = &config.grafana.tls {
        builder = apply_tls(builder, tls)?;
    }

    builder.build().map_err(TempoError::Request)
}
