//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate URLs of Grafana and every static datasource
//! - Detect duplicate datasource UIDs
//! - Validate value ranges (timeouts, log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AdapterConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::schema::AdapterConfig;
use crate::resilience::timeouts::MAX_REQUEST_DURATION;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check that `raw` is an absolute http(s) URL.
pub fn check_http_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{}' in '{}'", other, raw)),
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &AdapterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.datasources.is_empty() {
        if let Err(msg) = check_http_url(&config.grafana.url) {
            errors.push(ValidationError::new("grafana.url", msg));
        }
    }

    if let Some(tls) = &config.grafana.tls {
        if tls.cert_path.is_some() != tls.key_path.is_some() {
            errors.push(ValidationError::new(
                "grafana.tls",
                "cert_path and key_path must be set together",
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, ds) in config.datasources.iter().enumerate() {
        if ds.uid.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("datasources[{}].uid", i),
                "must not be empty",
            ));
        } else if !seen.insert(ds.uid.as_str()) {
            errors.push(ValidationError::new(
                format!("datasources[{}].uid", i),
                format!("duplicate uid '{}'", ds.uid),
            ));
        }
        if let Err(msg) = check_http_url(&ds.url) {
            errors.push(ValidationError::new(format!("datasources[{}].url", i), msg));
        }
    }

    let max_secs = MAX_REQUEST_DURATION.as_secs();
    if config.timeouts.request_secs == 0 || config.timeouts.request_secs > max_secs {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!("must be between 1 and {}", max_secs),
        ));
    }
    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::new("timeouts.connect_secs", "must be positive"));
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
