//! Operation handlers behind the router.
//!
//! Each handler performs at most one storage call and returns either a ready
//! [`ApiResponse`] or an [`ApiError`] for the router to format. Payload and
//! page-parameter problems are detected before the store is touched.

use axum::http::StatusCode;
use std::collections::HashMap;
use tracing::{debug, info};

use super::error::ApiError;
use super::models::{FeedbackResponse, MoviePage};
use super::pagination::{PAGE_SIZE, paginate};
use super::router::ApiResponse;
use super::utils::parse_page;
use super::validation::parse_movie;
use crate::storage::MovieStore;

const MSG_CREATED: &str = "resource created successfully";
const MSG_UPDATED: &str = "resource updated successfully";
const MSG_DELETED: &str = "resource deleted successfully";

const ERR_RETRIEVING: &str = "error retrieving item";
const ERR_SCANNING: &str = "error scanning resources";
const ERR_INSERTING: &str = "error inserting resource";
const ERR_UPDATING: &str = "error updating resource";
const ERR_DELETING: &str = "error deleting resource";

/// GET with an id: the movie as JSON, or 404
pub async fn get_movie(store: &dyn MovieStore, id: &str) -> Result<ApiResponse, ApiError> {
    let movie = store
        .get(id)
        .await
        .map_err(|source| ApiError::storage(ERR_RETRIEVING, source))?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

    debug!(movie_id = %movie.id, "Movie found");
    ApiResponse::json(StatusCode::OK, &movie)
}

/// GET without an id: one page of the ID-sorted collection.
///
/// The whole table is scanned and sorted here; the store gives no ordering
/// guarantee.
pub async fn list_movies(
    store: &dyn MovieStore,
    query: &HashMap<String, String>,
) -> Result<ApiResponse, ApiError> {
    let page = parse_page(query)?;

    let mut movies = store
        .scan()
        .await
        .map_err(|source| ApiError::storage(ERR_SCANNING, source))?;
    movies.sort_unstable_by(|a, b| a.id.cmp(&b.id));

    let (slice, total_pages) = paginate(&movies, page, PAGE_SIZE);
    if page > total_pages {
        return Err(ApiError::PageOutOfRange {
            requested: page,
            total_pages,
        });
    }

    debug!(page, total_pages, returned = slice.len(), "Listing movies");
    let body = MoviePage {
        movies: slice.to_vec(),
        actual_page: page,
        total_pages,
    };
    ApiResponse::json(StatusCode::OK, &body)
}

/// POST: upsert the movie from the body
pub async fn create_movie(store: &dyn MovieStore, body: &str) -> Result<ApiResponse, ApiError> {
    let movie = parse_movie(body)?;

    store
        .put(&movie)
        .await
        .map_err(|source| ApiError::storage(ERR_INSERTING, source))?;

    info!(movie_id = %movie.id, "Movie created");
    Ok(ApiResponse::feedback(
        StatusCode::OK,
        FeedbackResponse::success(MSG_CREATED),
    ))
}

/// PUT: rewrite the name of the movie keyed by the body's id.
///
/// A missing record is created rather than reported.
pub async fn update_movie(store: &dyn MovieStore, body: &str) -> Result<ApiResponse, ApiError> {
    let movie = parse_movie(body)?;

    store
        .update_name(&movie.id, &movie.name)
        .await
        .map_err(|source| ApiError::storage(ERR_UPDATING, source))?;

    info!(movie_id = %movie.id, "Movie updated");
    Ok(ApiResponse::feedback(
        StatusCode::OK,
        FeedbackResponse::success(MSG_UPDATED),
    ))
}

/// DELETE: remove the movie keyed by the body's id, present or not
pub async fn delete_movie(store: &dyn MovieStore, body: &str) -> Result<ApiResponse, ApiError> {
    let movie = parse_movie(body)?;

    store
        .delete(&movie.id)
        .await
        .map_err(|source| ApiError::storage(ERR_DELETING, source))?;

    info!(movie_id = %movie.id, "Movie deleted");
    Ok(ApiResponse::feedback(
        StatusCode::OK,
        FeedbackResponse::success(MSG_DELETED),
    ))
}
