//! Storage collaborator for movie records
//!
//! The router only talks to [`MovieStore`]. Backends are chosen by
//! `storage.provider` and constructed once per process by [`connect`].

pub mod dynamo;
pub mod local;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::api::models::Movie;
use crate::config::{StorageConfig, StorageProvider};

pub use dynamo::DynamoStore;
pub use local::LocalStore;
pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("DynamoDB request failed: {0}")]
    Backend(String),

    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed item: {0}")]
    MalformedItem(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage misconfigured: {0}")]
    Misconfigured(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Single-table key-value store holding movies keyed by id.
///
/// Every method is exactly one round-trip to the backend. Writes are
/// unconditional: `put` overwrites, `update_name` creates the record when the
/// key is absent, and `delete` succeeds for missing keys.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Fetch one movie by id
    async fn get(&self, id: &str) -> Result<Option<Movie>>;

    /// Insert or overwrite a movie
    async fn put(&self, movie: &Movie) -> Result<()>;

    /// Rewrite only the name attribute of the record keyed by `id`
    async fn update_name(&self, id: &str, name: &str) -> Result<()>;

    /// Remove the record keyed by `id`
    async fn delete(&self, id: &str) -> Result<()>;

    /// Return every stored movie, in no particular order
    async fn scan(&self) -> Result<Vec<Movie>>;

    /// Make completed writes durable. Remote backends have nothing to do.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Build the configured backend.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn MovieStore>> {
    match config.provider {
        StorageProvider::DynamoDb => {
            let table_name = config
                .table_name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| StorageError::Misconfigured("table_name is not set".into()))?;

            let store = DynamoStore::from_env(
                table_name,
                config.region.clone(),
                config.endpoint.clone(),
            )
            .await;
            Ok(Arc::new(store))
        }
        StorageProvider::Fjall => Ok(Arc::new(LocalStore::open(&config.fjall_path)?)),
        StorageProvider::Memory => Ok(Arc::new(InMemoryStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn connect_memory_backend() {
        let config = StorageConfig {
            provider: StorageProvider::Memory,
            ..StorageConfig::default()
        };

        let store = connect(&config).await.unwrap();
        assert!(store.scan().await.unwrap().is_empty());
        store.flush().unwrap();
    }

    #[tokio::test]
    async fn connect_fjall_backend() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            provider: StorageProvider::Fjall,
            fjall_path: temp_dir.path().join("movies"),
            ..StorageConfig::default()
        };

        let store = connect(&config).await.unwrap();
        store.put(&Movie::new("m1", "Alpha")).await.unwrap();
        assert_eq!(store.get("m1").await.unwrap(), Some(Movie::new("m1", "Alpha")));
    }

    #[tokio::test]
    async fn connect_dynamo_requires_table_name() {
        let config = StorageConfig {
            provider: StorageProvider::DynamoDb,
            table_name: None,
            ..StorageConfig::default()
        };

        let result = connect(&config).await;
        assert!(matches!(result, Err(StorageError::Misconfigured(_))));
    }
}
