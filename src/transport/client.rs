//! Tempo HTTP API client.
//!
//! # Responsibilities
//! - Turn a [`BackendRequest`] into a full URL under the datasource base
//! - Issue a single GET through the caller's reqwest client
//! - Enforce the body size cap and the request deadline
//! - Classify non-2xx statuses and empty bodies as errors

use std::time::{Duration, Instant};

use reqwest::Client;
use url::Url;

use crate::error::{Operation, TempoError, TempoResult};
use crate::observability::metrics;
use crate::query::{append_segments, BackendRequest};
use crate::resilience::timeouts::{effective_deadline, with_deadline, MAX_REQUEST_DURATION};
use crate::transport::limits::{read_capped, MAX_RESPONSE_BYTES};

/// Client bound to one Tempo datasource base URL.
///
/// Holds no per-call state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TempoClient {
    http: Client,
    base_url: String,
    response_limit: usize,
    deadline: Duration,
}

impl TempoClient {
    /// Create a client for `base_url`. Fails before any network call if the
    /// URL is not an absolute http(s) URL.
    pub fn new(http: Client, base_url: &str) -> TempoResult<Self> {
        let parsed = Url::parse(base_url).map_err(|source| TempoError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TempoError::Config(format!(
                "unsupported scheme '{}' in base URL '{}'",
                parsed.scheme(),
                base_url
            )));
        }

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            response_limit: MAX_RESPONSE_BYTES,
            deadline: MAX_REQUEST_DURATION,
        })
    }

    /// Override the body size cap.
    pub fn with_response_limit(mut self, bytes: usize) -> Self {
        self.response_limit = bytes;
        self
    }

    /// Override the request deadline (never above 30 seconds).
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = effective_deadline(deadline);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL with encoded query parameters.
    pub fn url_for(&self, request: &BackendRequest) -> TempoResult<Url> {
        let mut url = append_segments(&self.base_url, &request.segments)?;
        if !request.params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(request.params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// Perform the request and return the (possibly truncated) body bytes.
    pub async fn get(&self, operation: Operation, request: &BackendRequest) -> TempoResult<Vec<u8>> {
        let url = self.url_for(request)?;
        let started = Instant::now();

        let result = with_deadline(self.deadline, self.execute(operation, url)).await;

        metrics::record_request(operation, metrics::outcome(&result), started);
        if let Err(e) = &result {
            tracing::warn!(operation = %operation, error = %e, "Tempo request failed");
        }
        result
    }

    async fn execute(&self, operation: Operation, url: Url) -> TempoResult<Vec<u8>> {
        tracing::debug!(operation = %operation, url = %url, "Sending Tempo request");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = read_capped(response, self.response_limit)
                .await
                .map(|b| String::from_utf8_lossy(&b.bytes).into_owned())
                .unwrap_or_default();
            return Err(TempoError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = read_capped(response, self.response_limit).await?;
        if body.truncated {
            tracing::warn!(
                operation = %operation,
                limit = self.response_limit,
                "Response body exceeded size limit, truncated"
            );
            metrics::record_truncated(operation);
        }
        if body.bytes.is_empty() {
            return Err(TempoError::EmptyResponse);
        }

        tracing::debug!(
            operation = %operation,
            status = status.as_u16(),
            bytes = body.bytes.len(),
            "Tempo response received"
        );
        metrics::record_response_bytes(operation, body.bytes.len());
        Ok(body.bytes)
    }
}
