//! Probe service configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Probe service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Registry connection settings
    pub registry: RegistrySettings,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_PORT,
            registry: RegistrySettings::default(),
        }
    }
}

impl ProbeConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        // Check for the platform's PORT env variable first (takes priority)
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        // Then check for PROBE_ prefixed variables
        if let Ok(host) = std::env::var("PROBE_HOST") {
            cfg.host = host;
        }
        if let Ok(port) = std::env::var("PROBE_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        // Registry settings
        if let Ok(endpoint) = std::env::var("PROBE_REGISTRY_ENDPOINT") {
            if !endpoint.is_empty() {
                cfg.registry.endpoint = Some(endpoint);
            }
        }
        if let Ok(path) = std::env::var("PROBE_REGISTRY_FIXTURES") {
            if !path.is_empty() {
                cfg.registry.fixtures_path = Some(path);
            }
        }
        if let Ok(val) = std::env::var("PROBE_REGISTRY_TIMEOUT_MS") {
            if let Ok(v) = val.parse() {
                cfg.registry.timeout_ms = v;
            }
        }

        Ok(cfg)
    }

    /// Decide where the service's registry handle comes from.
    ///
    /// A probe cannot exist without a registry, so exactly one source must
    /// be configured; anything else is a startup error.
    pub fn registry_source(&self) -> Result<RegistrySource> {
        match (&self.registry.endpoint, &self.registry.fixtures_path) {
            (Some(endpoint), None) => Ok(RegistrySource::Endpoint(endpoint.clone())),
            (None, Some(path)) => Ok(RegistrySource::Fixtures(path.clone())),
            (Some(_), Some(_)) => anyhow::bail!(
                "both PROBE_REGISTRY_ENDPOINT and PROBE_REGISTRY_FIXTURES are set; configure exactly one"
            ),
            (None, None) => anyhow::bail!(
                "no registry configured: set PROBE_REGISTRY_ENDPOINT or PROBE_REGISTRY_FIXTURES"
            ),
        }
    }
}

/// Registry connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// HTTP endpoint of a live registry (e.g. "http://registry:8080")
    pub endpoint: Option<String>,
    /// Path to a JSON fixtures file for a scripted registry
    pub fixtures_path: Option<String>,
    /// Timeout for registry checks in milliseconds
    pub timeout_ms: u64,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            fixtures_path: None,
            timeout_ms: crate::DEFAULT_REGISTRY_TIMEOUT_MS,
        }
    }
}

/// Where the service's registry handle comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrySource {
    /// Live registry over HTTP
    Endpoint(String),
    /// Scripted in-memory registry loaded from fixtures
    Fixtures(String),
}

impl RegistrySource {
    /// (kind, detail) pair for logs and the registry info endpoint.
    pub fn describe(&self) -> (&'static str, &str) {
        match self {
            RegistrySource::Endpoint(endpoint) => ("http", endpoint),
            RegistrySource::Fixtures(path) => ("fixtures", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(endpoint: Option<&str>, fixtures: Option<&str>) -> ProbeConfig {
        let mut cfg = ProbeConfig::default();
        cfg.registry.endpoint = endpoint.map(String::from);
        cfg.registry.fixtures_path = fixtures.map(String::from);
        cfg
    }

    #[test]
    fn test_endpoint_source() {
        let cfg = config_with(Some("http://registry:8080"), None);
        assert_eq!(
            cfg.registry_source().unwrap(),
            RegistrySource::Endpoint("http://registry:8080".to_string())
        );
    }

    #[test]
    fn test_fixtures_source() {
        let cfg = config_with(None, Some("fixtures.json"));
        assert_eq!(
            cfg.registry_source().unwrap(),
            RegistrySource::Fixtures("fixtures.json".to_string())
        );
    }

    #[test]
    fn test_no_source_is_an_error() {
        let cfg = config_with(None, None);
        assert!(cfg.registry_source().is_err());
    }

    #[test]
    fn test_both_sources_is_an_error() {
        let cfg = config_with(Some("http://registry:8080"), Some("fixtures.json"));
        assert!(cfg.registry_source().is_err());
    }

    #[test]
    fn test_defaults() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.port, crate::DEFAULT_PORT);
        assert_eq!(cfg.registry.timeout_ms, crate::DEFAULT_REGISTRY_TIMEOUT_MS);
        assert!(cfg.registry.endpoint.is_none());
    }
}
