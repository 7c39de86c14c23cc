//! Environment-sourced configuration.
//!
//! Reads configuration from environment variables:
//! - `LANGFLOW_HOST`: flow engine base URL (default: "http://localhost:7860")
//! - `LANGFLOW_FLOW_ID`: flow to execute (required)
//! - `LANGFLOW_SECRET_KEY`: sent as `x-api-key` (required)
//! - `FLOWRELAY_HOST`: server bind address (default: "0.0.0.0")
//! - `FLOWRELAY_PORT`: server listen port (default: "5000")
//!
//! Blank values count as unset.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

pub const LANGFLOW_HOST: &str = "LANGFLOW_HOST";
pub const LANGFLOW_FLOW_ID: &str = "LANGFLOW_FLOW_ID";
pub const LANGFLOW_SECRET_KEY: &str = "LANGFLOW_SECRET_KEY";
pub const FLOWRELAY_HOST: &str = "FLOWRELAY_HOST";
pub const FLOWRELAY_PORT: &str = "FLOWRELAY_PORT";

pub const DEFAULT_BASE_URL: &str = "http://localhost:7860";
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the flow engine.
///
/// Only obtainable through [`FlowConfig::from_env`], [`FlowConfig::from_lookup`]
/// or [`FlowConfig::new`], all of which reject a missing flow id or API key.
#[derive(Clone, PartialEq, Eq)]
pub struct FlowConfig {
    base_url: String,
    flow_id: String,
    api_key: String,
    timeout: Duration,
}

impl FlowConfig {
    pub fn new(
        base_url: impl Into<String>,
        flow_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let flow_id = flow_id.into();
        let api_key = api_key.into();

        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingVar(LANGFLOW_SECRET_KEY));
        }
        if flow_id.trim().is_empty() {
            return Err(ConfigError::MissingVar(LANGFLOW_FLOW_ID));
        }
        let base_url = if base_url.trim().is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base_url.trim().trim_end_matches('/').to_string()
        };

        Ok(FlowConfig {
            base_url,
            flow_id: flow_id.trim().to_string(),
            api_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(LANGFLOW_SECRET_KEY).ok_or(ConfigError::MissingVar(LANGFLOW_SECRET_KEY))?;
        let flow_id = get(LANGFLOW_FLOW_ID).ok_or(ConfigError::MissingVar(LANGFLOW_FLOW_ID))?;
        let base_url = get(LANGFLOW_HOST).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(base_url, flow_id, api_key)
    }

    /// Overrides the upstream timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base_url}/api/v1/run/{flow_id}`
    pub fn run_url(&self) -> String {
        format!("{}/api/v1/run/{}", self.base_url, self.flow_id)
    }
}

impl fmt::Debug for FlowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowConfig")
            .field("base_url", &self.base_url)
            .field("flow_id", &self.flow_id)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Listen address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get(FLOWRELAY_HOST).unwrap_or_else(|| DEFAULT_BIND_HOST.to_string());
        let port = match get(FLOWRELAY_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|err| ConfigError::InvalidVar {
                name: FLOWRELAY_PORT,
                value: raw.clone(),
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(ServerConfig { host, port })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn full_config_resolves() {
        let cfg = FlowConfig::from_lookup(lookup(&[
            (LANGFLOW_HOST, "https://flows.example.com/"),
            (LANGFLOW_FLOW_ID, "abc-123"),
            (LANGFLOW_SECRET_KEY, "sk-test"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url(), "https://flows.example.com");
        assert_eq!(cfg.flow_id(), "abc-123");
        assert_eq!(cfg.api_key(), "sk-test");
        assert_eq!(cfg.timeout(), Duration::from_secs(30));
        assert_eq!(
            cfg.run_url(),
            "https://flows.example.com/api/v1/run/abc-123"
        );
    }

    #[test]
    fn host_defaults_to_localhost() {
        let cfg = FlowConfig::from_lookup(lookup(&[
            (LANGFLOW_FLOW_ID, "flow"),
            (LANGFLOW_SECRET_KEY, "key"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url(), "http://localhost:7860");
    }

    #[test]
    fn missing_flow_id_is_rejected() {
        let err = FlowConfig::from_lookup(lookup(&[(LANGFLOW_SECRET_KEY, "key")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(LANGFLOW_FLOW_ID));
    }

    #[test]
    fn missing_secret_key_is_rejected() {
        let err = FlowConfig::from_lookup(lookup(&[(LANGFLOW_FLOW_ID, "flow")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(LANGFLOW_SECRET_KEY));
    }

    #[test]
    fn secret_key_is_checked_before_flow_id() {
        let err = FlowConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(LANGFLOW_SECRET_KEY));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = FlowConfig::from_lookup(lookup(&[
            (LANGFLOW_FLOW_ID, "   "),
            (LANGFLOW_SECRET_KEY, "key"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingVar(LANGFLOW_FLOW_ID));
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = FlowConfig::new("http://h", "flow", "super-secret").unwrap();
        let debug = format!("{:?}", cfg);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn server_config_defaults() {
        let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn server_config_rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[(FLOWRELAY_PORT, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { name: FLOWRELAY_PORT, .. }));
    }
}
