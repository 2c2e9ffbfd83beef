use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Local HTTP server configuration (`moviebox serve`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    #[default]
    #[serde(alias = "dynamo")]
    DynamoDb,
    Fjall,
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub provider: StorageProvider,
    /// DynamoDB table holding the movies (also read from `TABLE_NAME`)
    pub table_name: Option<String>,
    pub region: Option<String>,
    /// Endpoint override, e.g. a DynamoDB Local container
    pub endpoint: Option<String>,
    #[serde(default = "default_fjall_path")]
    pub fjall_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProvider::default(),
            table_name: None,
            region: None,
            endpoint: None,
            fjall_path: default_fjall_path(),
        }
    }
}

fn default_fjall_path() -> PathBuf {
    PathBuf::from("data/movies")
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.storage.provider, StorageProvider::DynamoDb);
        assert_eq!(config.storage.fjall_path, PathBuf::from("data/movies"));
        assert_eq!(config.telemetry.log_filter, "info");
    }

    #[test]
    fn test_provider_names() {
        let config: StorageConfig = toml::from_str(r#"provider = "fjall""#).unwrap();
        assert_eq!(config.provider, StorageProvider::Fjall);

        let config: StorageConfig = toml::from_str(r#"provider = "dynamodb""#).unwrap();
        assert_eq!(config.provider, StorageProvider::DynamoDb);

        let config: StorageConfig = toml::from_str(r#"provider = "dynamo""#).unwrap();
        assert_eq!(config.provider, StorageProvider::DynamoDb);
    }
}
