//! In-process backend for tests and throwaway local runs

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{MovieStore, Result, StorageError};
use crate::api::models::Movie;

/// Map-backed store that counts every collaborator call.
///
/// A store built with [`InMemoryStore::failing`] rejects every call, which is
/// how the backend-failure paths of the router are exercised.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    movies: RwLock<BTreeMap<String, Movie>>,
    calls: AtomicUsize,
    failing: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let movies = movies
            .into_iter()
            .map(|movie| (movie.id.clone(), movie))
            .collect();

        Self {
            movies: RwLock::new(movies),
            ..Self::default()
        }
    }

    /// Number of storage calls served so far, failed ones included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn record_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing {
            return Err(StorageError::Unavailable(
                "in-memory store configured to fail".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MovieStore for InMemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Movie>> {
        self.record_call()?;
        Ok(self.movies.read().await.get(id).cloned())
    }

    async fn put(&self, movie: &Movie) -> Result<()> {
        self.record_call()?;
        self.movies
            .write()
            .await
            .insert(movie.id.clone(), movie.clone());
        Ok(())
    }

    async fn update_name(&self, id: &str, name: &str) -> Result<()> {
        self.record_call()?;
        self.movies
            .write()
            .await
            .entry(id.to_string())
            .and_modify(|movie| movie.name = name.to_string())
            .or_insert_with(|| Movie::new(id, name));
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record_call()?;
        self.movies.write().await.remove(id);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Movie>> {
        self.record_call()?;
        Ok(self.movies.read().await.values().cloned().collect())
    }
}
