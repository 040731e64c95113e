//! Server Configuration
//!
//! Host, port, CORS origins, data file location and page-size limits.
//! Loaded from a JSON file; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// JSON array of records served by the API
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Page size used when only `page` is supplied (default: 10)
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest accepted `limit` (default: 100)
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Minimum log severity (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(), // Vite dev server
    ]
}

fn default_data_file() -> PathBuf {
    PathBuf::from("dummy_db/data.json")
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    100
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            data_file: default_data_file(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check page-size limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::Invalid("max_limit must be > 0".to_string()));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "default_limit must be between 1 and max_limit ({})",
                self.max_limit
            )));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.max_limit, 100);
        assert!(!config.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ServerConfig::from_json_str(r#"{"port": 9000, "log_level": "warn"}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, Severity::Warn);
        assert_eq!(config.data_file, PathBuf::from("dummy_db/data.json"));
    }

    #[test]
    fn test_rejects_bad_limits() {
        assert!(matches!(
            ServerConfig::from_json_str(r#"{"max_limit": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ServerConfig::from_json_str(r#"{"default_limit": 500}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            ServerConfig::from_json_str("{port"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ServerConfig::load(Path::new("/nonexistent/datatable.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
