//! Local HTTP front door
//!
//! Serves the same routes API Gateway exposes in production so the router can
//! be exercised without the Lambda runtime:
//! - `/movies` (any method) for list, create, update and delete
//! - `/movies/{id}` (any method) for get-one
//! - `/health`

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::Method,
    response::IntoResponse,
    routing::{any, get},
};
use http_body_util::BodyExt;
use tokio::net::TcpListener;
use tower_http::decompression::RequestDecompressionLayer;
use tracing::info;

use super::{
    error::ApiError,
    models::{HealthResponse, RequestCounters},
    router::{ApiRequest, ApiResponse, ID_PARAM},
    state::AppState,
    utils::validate_body_size,
    validation::PayloadError,
};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

// API Gateway rejects payloads above 10MB before the function is invoked
const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Build the axum application over the shared router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/movies", any(movies))
        .route("/movies/{id}", any(movie_by_id))
        .route("/health", get(health))
        .with_state(state)
        // Automatically decompress gzip request bodies
        .layer(RequestDecompressionLayer::new())
}

pub async fn run(address: SocketAddr, state: AppState) -> Result<(), AnyError> {
    info!(provider = ?state.config.storage.provider, "Starting local movie API");
    let app = app(state);

    let listener = TcpListener::bind(address).await?;
    info!(%address, "MovieBox API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn movies(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: axum::body::Body,
) -> Result<ApiResponse, ApiError> {
    let request = ApiRequest::builder()
        .method(method)
        .query_parameters(query)
        .body(read_body(body).await?)
        .build();

    Ok(state.router.handle(request).await)
}

async fn movie_by_id(
    State(state): State<AppState>,
    method: Method,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: axum::body::Body,
) -> Result<ApiResponse, ApiError> {
    let request = ApiRequest::builder()
        .method(method)
        .path_parameters(HashMap::from([(ID_PARAM.to_string(), id)]))
        .query_parameters(query)
        .body(read_body(body).await?)
        .build();

    Ok(state.router.handle(request).await)
}

/// Reads the request body as UTF-8 and enforces the size limit
///
/// Decompression is handled by `RequestDecompressionLayer`, so this sees the
/// decoded bytes.
async fn read_body(body: axum::body::Body) -> Result<String, ApiError> {
    let data = body
        .collect()
        .await
        .map_err(ApiError::BodyRead)?
        .to_bytes()
        .to_vec();

    validate_body_size(&data, MAX_PAYLOAD_SIZE)?;

    String::from_utf8(data).map_err(|_| ApiError::InvalidPayload(PayloadError::NotUtf8))
}

/// Health check endpoint (GET /health)
///
/// Reports the crate version and the request counters kept by the router.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.router.metrics().snapshot();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        requests: RequestCounters {
            handled: snapshot.handled,
            client_errors: snapshot.client_errors,
            server_errors: snapshot.server_errors,
        },
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
