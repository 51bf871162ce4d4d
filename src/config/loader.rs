//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::AdapterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Overlay `GRAFANA_*` variables onto the configuration.
///
/// `lookup` is `std::env::var` in production; tests pass a map.
pub fn apply_env_overrides<F>(config: &mut AdapterConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(url) = non_empty("GRAFANA_URL") {
        config.grafana.url = url;
    }
    if let Some(key) = non_empty("GRAFANA_API_KEY") {
        config.grafana.api_key = Some(key);
    }
    if let Some(token) = non_empty("GRAFANA_ACCESS_TOKEN") {
        config.grafana.access_token = Some(token);
    }
    if let Some(token) = non_empty("GRAFANA_ID_TOKEN") {
        config.grafana.id_token = Some(token);
    }
}

/// Load, apply environment overrides, and validate a TOML file.
pub fn load_config(path: &Path) -> Result<AdapterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AdapterConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;
    finish(config)
}

/// Load from `path` when given, else start from defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AdapterConfig, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => finish(AdapterConfig::default()),
    }
}

fn finish(mut config: AdapterConfig) -> Result<AdapterConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GRAFANA_URL", "https://grafana.example.com"),
            ("GRAFANA_API_KEY", "glsa_xxx"),
            ("GRAFANA_ID_TOKEN", ""),
        ]
        .into_iter()
        .collect();

        let mut config = AdapterConfig::default();
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.grafana.url, "https://grafana.example.com");
        assert_eq!(config.grafana.api_key.as_deref(), Some("glsa_xxx"));
        assert!(config.grafana.id_token.is_none()); // Empty is ignored
        assert!(config.grafana.access_token.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[datasources]]
            uid = "tempo"
            url = "http://tempo:3200"
            name = "Tempo"

            [timeouts]
            request_secs = 10
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.datasources[0].name.as_deref(), Some("Tempo"));
        assert_eq!(config.timeouts.request_secs, 10);
    }

    #[test]
    fn test_load_config_reports_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [timeouts]
            request_secs = 0
            "#
        )
        .unwrap();

        match load_config(file.path()) {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.field == "timeouts.request_secs"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_config_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "datasources = 3").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/tempo-query.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
