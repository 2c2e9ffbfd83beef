//! Configuration management for MovieBox
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use moviebox::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Storage provider: {:?}", config.storage.provider);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `MOVIEBOX__<section>__<key>`
//!
//! Examples:
//! - `MOVIEBOX__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `MOVIEBOX__STORAGE__PROVIDER=fjall`
//! - `MOVIEBOX__TELEMETRY__LOG_FILTER=moviebox=debug`
//!
//! Inside a Lambda deployment the table comes from `TABLE_NAME`, and the AWS
//! SDK picks region and credentials from the usual `AWS_*` variables.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/moviebox.toml`.
//! This can be overridden using the `MOVIEBOX_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, ServerConfig, StorageConfig, StorageProvider, TelemetryConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or validation
    /// fails (e.g. DynamoDB selected without a table name).
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[storage]
provider = "dynamodb"
table_name = "Movies"
region = "us-east-1"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.storage.table_name.as_deref(), Some("Movies"));
        assert_eq!(config.storage.region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_validation_catches_missing_table() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[storage]
provider = "dynamodb"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::MissingTableName)
        ));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:3000"

[storage]
provider = "dynamodb"
table_name = "Movies"
region = "eu-central-1"
endpoint = "http://localhost:8000"

[telemetry]
log_filter = "moviebox=debug,tower_http=info"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();

        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.storage.provider, StorageProvider::DynamoDb);
        assert_eq!(config.storage.endpoint.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.telemetry.log_filter, "moviebox=debug,tower_http=info");
    }
}
