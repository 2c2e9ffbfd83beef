//! API models for the MovieBox resource surface.
//!
//! Three JSON shapes cross the wire:
//! - a single [`Movie`] for `GET /movies/{id}` and as the payload of mutations
//! - a [`MoviePage`] for `GET /movies?page=N`
//! - a [`FeedbackResponse`] envelope for mutation results and every error
//!
//! ```json
//! { "id": "m1", "name": "Alpha" }
//! { "data": [{ "id": "m1", "name": "Alpha" }], "actual_page": 1, "total_pages": 1 }
//! { "success": true, "message": "resource created successfully" }
//! ```

use serde::{Deserialize, Serialize};

/// The only resource type served by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Movie {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One page of the ID-sorted collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(rename = "data")]
    pub movies: Vec<Movie>,
    pub actual_page: usize,
    pub total_pages: usize,
}

/// `{success, message}` envelope returned by mutations and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: String,
}

impl FeedbackResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequestCounters {
    pub handled: u64,
    pub client_errors: u64,
    pub server_errors: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub requests: RequestCounters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_serializes_movies_under_data() {
        let page = MoviePage {
            movies: vec![Movie::new("m1", "Alpha")],
            actual_page: 1,
            total_pages: 1,
        };

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(
            value,
            json!({
                "data": [{ "id": "m1", "name": "Alpha" }],
                "actual_page": 1,
                "total_pages": 1
            })
        );
    }

    #[test]
    fn movie_name_defaults_when_missing() {
        let movie: Movie = serde_json::from_str(r#"{"id":"m1"}"#).unwrap();
        assert_eq!(movie, Movie::new("m1", ""));
    }

    #[test]
    fn movie_rejects_non_string_fields() {
        assert!(serde_json::from_str::<Movie>(r#"{"id":42,"name":"x"}"#).is_err());
    }
}
