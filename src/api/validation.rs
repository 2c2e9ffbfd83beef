//! Request body shape checks shared by the write operations

use thiserror::Error;

use super::models::Movie;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("body is not a movie object: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("body is not valid UTF-8")]
    NotUtf8,
    #[error("id must be a non-empty string")]
    MissingId,
}

/// Parse a request body into a [`Movie`], checking its shape only.
///
/// A missing `name` is accepted (delete only reads the id); a missing or empty
/// `id` is not, since it is the table key.
pub fn parse_movie(body: &str) -> Result<Movie, PayloadError> {
    let movie: Movie = serde_json::from_str(body)?;
    if movie.id.is_empty() {
        return Err(PayloadError::MissingId);
    }
    Ok(movie)
}
