//! Service configuration
//!
//! Loaded from an optional YAML file; every field has a default, so an empty
//! file (or no file) is a valid configuration. Command-line flags are applied
//! on top by the binary.
//!
//! ```yaml
//! database_path: /var/lib/vietsent/vietsent.db
//! lexicon_path: replacement_dict.json
//! bind_address: 127.0.0.1:5000
//! history_limit: 50
//! min_confidence: 0.5
//! model:
//!   name: wonrax/phobert-base-vietnamese-sentiment
//!   endpoint: https://api-inference.huggingface.co
//!   timeout_secs: 30
//! ```

use crate::classify::DEFAULT_MIN_CONFIDENCE;
use crate::storage::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MODEL_NAME: &str = "wonrax/phobert-base-vietnamese-sentiment";
pub const DEFAULT_MODEL_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_LEXICON_PATH: &str = "replacement_dict.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Default database path (~/.local/share/vietsent/vietsent.db)
pub fn default_database_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("vietsent").join("vietsent.db")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Pretrained model identifier
    pub name: String,
    /// Base URL of the inference service
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL_NAME.to_string(),
            endpoint: DEFAULT_MODEL_ENDPOINT.to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_path: PathBuf,
    pub lexicon_path: PathBuf,
    pub bind_address: String,
    /// Maximum number of records returned by the history endpoint
    pub history_limit: usize,
    /// Predictions scoring below this are reported as neutral
    pub min_confidence: f32,
    pub model: ModelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            lexicon_path: PathBuf::from(DEFAULT_LEXICON_PATH),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            model: ModelConfig::default(),
        }
    }
}

impl Config {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null rather than an empty map
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::Invalid("model.name must not be empty".into()));
        }
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::Invalid("model.timeout_secs must be positive".into()));
        }
        self.bind_addr()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::Invalid(format!("bind_address '{}': {}", self.bind_address, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.min_confidence, 0.5);
        assert_eq!(config.model.name, DEFAULT_MODEL_NAME);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = Config::from_yaml_str(
            "bind_address: 0.0.0.0:8080\nmodel:\n  endpoint: http://localhost:9000\n",
        )
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        assert_eq!(config.model.endpoint, "http://localhost:9000");
        assert_eq!(config.model.name, DEFAULT_MODEL_NAME);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for yaml in [
            "history_limit: 0",
            "min_confidence: 1.5",
            "bind_address: not-an-address",
            "model:\n  timeout_secs: 0",
        ] {
            assert!(
                matches!(Config::from_yaml_str(yaml), Err(ConfigError::Invalid(_))),
                "accepted {yaml:?}"
            );
        }
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        assert!(matches!(
            Config::from_yaml_str("history_limit: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vietsent.yaml");
        std::fs::write(&path, "history_limit: 10\nlexicon_path: /etc/vietsent/dict.json\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.lexicon_path, PathBuf::from("/etc/vietsent/dict.json"));

        assert!(matches!(
            Config::load(dir.path().join("missing.yaml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
