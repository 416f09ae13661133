//! Configuration management for the simulators
//!
//! Settings are resolved from, in increasing priority:
//! 1. Default values
//! 2. Configuration file (TOML format)
//! 3. Environment variables

use crate::logging::LoggingConfig;
use crate::validation;
use cloudsim_common::{DEFAULT_INSTANCE_TYPE, DEFAULT_NAMESPACE, DEFAULT_REGION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Compute simulator defaults
    pub compute: ComputeConfig,
    /// Object storage simulator defaults
    pub storage: StorageConfig,
    /// Pod orchestration simulator defaults
    pub orchestration: OrchestrationConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    /// Instance type used when a create call does not name one
    pub default_instance_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Region used when a create call does not name one
    pub default_region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestrationConfig {
    /// Namespace used when a create call does not name one
    pub default_namespace: String,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            default_instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_region: DEFAULT_REGION.to_string(),
        }
    }
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            default_namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl SimConfig {
    /// Load configuration from the first config file found, then apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_path_buf(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let paths = [
            std::env::var("CLOUDSIM_CONFIG").ok().map(PathBuf::from),
            Some(PathBuf::from("./cloudsim.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(instance_type) = lookup("CLOUDSIM_DEFAULT_INSTANCE_TYPE") {
            self.compute.default_instance_type = instance_type;
        }
        if let Some(region) = lookup("CLOUDSIM_DEFAULT_REGION") {
            self.storage.default_region = region;
        }
        if let Some(namespace) = lookup("CLOUDSIM_DEFAULT_NAMESPACE") {
            self.orchestration.default_namespace = namespace;
        }
        if let Some(level) = lookup("CLOUDSIM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(dir) = lookup("CLOUDSIM_LOG_DIR") {
            self.logging.file_path = Some(PathBuf::from(dir));
        }
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compute.default_instance_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Default instance type cannot be empty".to_string(),
            ));
        }

        if self.storage.default_region.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Default region cannot be empty".to_string(),
            ));
        }

        validation::validate_namespace(&self.orchestration.default_namespace)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0:?}: {1}")]
    FileRead(PathBuf, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Config validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.compute.default_instance_type, "t2.micro");
        assert_eq!(config.storage.default_region, "us-east-1");
        assert_eq!(config.orchestration.default_namespace, "default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SimConfig::default();
        config.compute.default_instance_type = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.storage.default_region = String::new();
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.orchestration.default_namespace = "Not Valid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generate_sample_config() {
        let sample = SimConfig::generate_sample();
        assert!(sample.contains("[compute]"));
        assert!(sample.contains("[storage]"));
        assert!(sample.contains("[orchestration]"));
        assert!(sample.contains("[logging]"));

        let parsed: SimConfig = toml::from_str(&sample).unwrap();
        assert_eq!(parsed.storage.default_region, "us-east-1");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\ndefault_region = \"eu-west-1\"").unwrap();

        let config = SimConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.storage.default_region, "eu-west-1");
        assert_eq!(config.compute.default_instance_type, "t2.micro");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = SimConfig::load_from_file(Path::new("/nonexistent/cloudsim.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_, _)));
    }

    #[test]
    fn test_load_from_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[compute\ndefault_instance_type = 3").unwrap();

        let err = SimConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CLOUDSIM_DEFAULT_INSTANCE_TYPE", "m5.large"),
            ("CLOUDSIM_DEFAULT_NAMESPACE", "staging"),
            ("CLOUDSIM_LOG_DIR", "/var/log/cloudsim"),
        ]
        .into_iter()
        .collect();

        let mut config = SimConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.compute.default_instance_type, "m5.large");
        assert_eq!(config.orchestration.default_namespace, "staging");
        assert_eq!(config.storage.default_region, "us-east-1");
        assert_eq!(
            config.logging.file_path,
            Some(PathBuf::from("/var/log/cloudsim"))
        );
    }
}
