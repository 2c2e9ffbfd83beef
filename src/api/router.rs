//! Transport-neutral request router
//!
//! Both front doors (the Lambda adapter and the local axum server) turn their
//! native request into an [`ApiRequest`], hand it to [`MovieRouter::handle`],
//! and translate the returned [`ApiResponse`] back. The router never fails:
//! every outcome, errors included, is a JSON response with a status code.

use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::response::IntoResponse;
use bon::Builder;
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error as _;
use std::sync::Arc;
use tracing::{Span, error, info, instrument};

use super::error::ApiError;
use super::models::FeedbackResponse;
use super::services;
use crate::observability::Metrics;
use crate::storage::MovieStore;

/// Path parameter naming a single movie
pub const ID_PARAM: &str = "id";

const JSON_CONTENT_TYPE: &str = "application/json";

/// One invocation as delivered by the front door
#[derive(Debug, Clone, Default, Builder)]
pub struct ApiRequest {
    #[builder(default)]
    pub method: Method,
    #[builder(default)]
    pub path_parameters: HashMap<String, String>,
    #[builder(default)]
    pub query_parameters: HashMap<String, String>,
    #[builder(default, into)]
    pub body: String,
}

impl ApiRequest {
    /// The `id` path parameter, if present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.path_parameters
            .get(ID_PARAM)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// Status, headers and JSON body handed back to the front door
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status_code: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    fn with_body(status_code: StatusCode, body: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
        Self {
            status_code,
            headers,
            body,
        }
    }

    /// Serialize `value` as the response body
    pub fn json<T: Serialize>(status_code: StatusCode, value: &T) -> Result<Self, ApiError> {
        Ok(Self::with_body(status_code, serde_json::to_string(value)?))
    }

    /// `{success, message}` envelope
    pub fn feedback(status_code: StatusCode, feedback: FeedbackResponse) -> Self {
        // Two plain fields; serialization cannot fail
        let body = serde_json::to_string(&feedback).unwrap_or_default();
        Self::with_body(status_code, body)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> axum::response::Response {
        (self.status_code, self.headers, self.body).into_response()
    }
}

/// The five operations, keyed by method and whether an id is in the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    GetOne,
    Create,
    Update,
    Delete,
}

impl Route {
    /// Fixed dispatch table; `None` means the method is not supported.
    pub fn resolve(method: &Method, has_id: bool) -> Option<Self> {
        if *method == Method::GET {
            Some(if has_id { Route::GetOne } else { Route::List })
        } else if *method == Method::POST {
            Some(Route::Create)
        } else if *method == Method::PUT {
            Some(Route::Update)
        } else if *method == Method::DELETE {
            Some(Route::Delete)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::List => "list",
            Route::GetOne => "get_one",
            Route::Create => "create",
            Route::Update => "update",
            Route::Delete => "delete",
        }
    }
}

/// Dispatches requests to the operation handlers over a shared store handle.
#[derive(Clone)]
pub struct MovieRouter {
    store: Arc<dyn MovieStore>,
    metrics: Arc<Metrics>,
}

impl MovieRouter {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self {
            store,
            metrics: Arc::new(Metrics::new()),
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[instrument(
        name = "movie_request",
        skip_all,
        fields(method = %request.method, route = tracing::field::Empty, status = tracing::field::Empty)
    )]
    pub async fn handle(&self, request: ApiRequest) -> ApiResponse {
        let result = match Route::resolve(&request.method, request.id().is_some()) {
            Some(route) => {
                Span::current().record("route", route.as_str());
                self.dispatch(route, &request).await
            }
            None => Err(ApiError::MethodNotAllowed(request.method.clone())),
        };

        let response = result.unwrap_or_else(|err| {
            log_failure(&err);
            ApiResponse::from(err)
        });

        Span::current().record("status", response.status_code.as_u16());
        self.metrics.record(response.status_code.as_u16());
        response
    }

    /// Answer a request the front door could not turn into an [`ApiRequest`]
    pub fn reject(&self, err: ApiError) -> ApiResponse {
        log_failure(&err);
        let response = ApiResponse::from(err);
        self.metrics.record(response.status_code.as_u16());
        response
    }

    async fn dispatch(&self, route: Route, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let store = self.store.as_ref();
        match route {
            Route::List => services::list_movies(store, &request.query_parameters).await,
            Route::GetOne => services::get_movie(store, request.id().unwrap_or_default()).await,
            Route::Create => services::create_movie(store, &request.body).await,
            Route::Update => services::update_movie(store, &request.body).await,
            Route::Delete => services::delete_movie(store, &request.body).await,
        }
    }
}

fn log_failure(err: &ApiError) {
    let status = err.status_code();
    if status.is_server_error() {
        match err.source() {
            Some(cause) => error!(error = %err, cause = %cause, "Request failed"),
            None => error!(error = %err, "Request failed"),
        }
    } else {
        match err.source() {
            Some(cause) => info!(status = status.as_u16(), error = %err, cause = %cause, "Request rejected"),
            None => info!(status = status.as_u16(), error = %err, "Request rejected"),
        }
    }
}
