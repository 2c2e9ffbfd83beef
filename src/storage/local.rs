//! Fjall-backed movie store for local development
//!
//! Movies live in a single `movies` partition keyed by id, with the JSON
//! encoding of the record as the value. Fjall iterates keys in byte order, so
//! `scan` already returns the collection sorted by id.

use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use tracing::{debug, info};

use super::{MovieStore, Result};
use crate::api::models::Movie;

const MOVIES_PARTITION: &str = "movies";

#[derive(Clone)]
pub struct LocalStore {
    keyspace: Keyspace,
    movies: PartitionHandle,
}

impl LocalStore {
    /// Open or create a store at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Fjall movie store at: {}", path.display());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let keyspace = Config::new(path).open()?;
        let movies = keyspace.open_partition(MOVIES_PARTITION, PartitionCreateOptions::default())?;

        Ok(Self { keyspace, movies })
    }

    fn read(&self, id: &str) -> Result<Option<Movie>> {
        match self.movies.get(id.as_bytes())? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    fn write(&self, movie: &Movie) -> Result<()> {
        let value = serde_json::to_vec(movie)?;
        self.movies.insert(movie.id.as_bytes(), value)?;
        Ok(())
    }
}

#[async_trait]
impl MovieStore for LocalStore {
    async fn get(&self, id: &str) -> Result<Option<Movie>> {
        self.read(id)
    }

    async fn put(&self, movie: &Movie) -> Result<()> {
        self.write(movie)?;
        debug!(movie_id = %movie.id, "Stored movie");
        Ok(())
    }

    // Read-modify-write; concurrent updates of one key are last-writer-wins.
    async fn update_name(&self, id: &str, name: &str) -> Result<()> {
        let movie = match self.read(id)? {
            Some(mut existing) => {
                existing.name = name.to_string();
                existing
            }
            None => Movie::new(id, name),
        };
        self.write(&movie)?;
        debug!(movie_id = %id, "Updated movie name");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.movies.remove(id.as_bytes())?;
        debug!(movie_id = %id, "Deleted movie");
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<Movie>> {
        let mut movies = Vec::new();
        for item in self.movies.iter() {
            let (_, value) = item?;
            movies.push(serde_json::from_slice(&value)?);
        }
        Ok(movies)
    }

    fn flush(&self) -> Result<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        info!("Fjall movie store flushed");
        Ok(())
    }
}
