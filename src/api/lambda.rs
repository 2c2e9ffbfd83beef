//! AWS Lambda front door
//!
//! API Gateway proxy events arrive as `lambda_http::Request`; path and query
//! parameters are read through [`RequestExt`] and the body is taken as text.

use std::collections::HashMap;
use std::sync::Arc;

use lambda_http::{Body, Error, Request, RequestExt, Response, service_fn};
use tracing::info;

use super::error::ApiError;
use super::router::{ApiRequest, ApiResponse, MovieRouter};
use super::validation::PayloadError;

/// Serve invocations until the runtime shuts the process down.
///
/// `router` is built once at cold start; every invocation shares its store
/// client.
pub async fn run(router: Arc<MovieRouter>) -> Result<(), Error> {
    info!("Starting Lambda runtime");
    lambda_http::run(service_fn(move |event: Request| {
        let router = Arc::clone(&router);
        async move { handle_event(&router, event).await }
    }))
    .await
}

/// Handle one invocation
pub async fn handle_event(router: &MovieRouter, event: Request) -> Result<Response<Body>, Error> {
    let response = match request_from_event(&event) {
        Ok(request) => router.handle(request).await,
        Err(err) => router.reject(err),
    };
    Ok(into_lambda_response(response))
}

/// Convert an API Gateway event into the router's request.
///
/// Binary bodies are accepted only when they decode as UTF-8.
pub fn request_from_event(event: &Request) -> Result<ApiRequest, ApiError> {
    let path_parameters: HashMap<String, String> = event
        .path_parameters()
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let query_parameters: HashMap<String, String> = event
        .query_string_parameters()
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    let body: &[u8] = event.body();
    let body = std::str::from_utf8(body)
        .map_err(|_| ApiError::InvalidPayload(PayloadError::NotUtf8))?;

    Ok(ApiRequest::builder()
        .method(event.method().clone())
        .path_parameters(path_parameters)
        .query_parameters(query_parameters)
        .body(body)
        .build())
}

fn into_lambda_response(response: ApiResponse) -> Response<Body> {
    let mut lambda_response = Response::new(Body::Text(response.body));
    *lambda_response.status_mut() = response.status_code;
    *lambda_response.headers_mut() = response.headers;
    lambda_response
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::{Method, StatusCode};

    #[test]
    fn request_from_event_maps_parameters() {
        let event = lambda_http::http::Request::builder()
            .method(Method::GET)
            .uri("/movies/m1")
            .body(Body::Empty)
            .unwrap()
            .with_path_parameters(HashMap::from([("id".to_string(), "m1".to_string())]))
            .with_query_string_parameters(HashMap::from([(
                "page".to_string(),
                "2".to_string(),
            )]));

        let request = request_from_event(&event).unwrap();

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.id(), Some("m1"));
        assert_eq!(request.query_parameters.get("page").map(String::as_str), Some("2"));
        assert!(request.body.is_empty());
    }

    #[test]
    fn request_from_event_reads_text_body() {
        let event = lambda_http::http::Request::builder()
            .method(Method::POST)
            .uri("/movies")
            .body(Body::Text(r#"{"id":"m1","name":"Alpha"}"#.to_string()))
            .unwrap();

        let request = request_from_event(&event).unwrap();
        assert_eq!(request.body, r#"{"id":"m1","name":"Alpha"}"#);
        assert_eq!(request.id(), None);
    }

    #[test]
    fn request_from_event_rejects_invalid_utf8() {
        let event = lambda_http::http::Request::builder()
            .method(Method::POST)
            .uri("/movies")
            .body(Body::Binary(b"{\"id\":\"m1\",\"name\":\"A\xff\"}".to_vec()))
            .unwrap();

        let err = request_from_event(&event).unwrap_err();
        assert!(matches!(err, ApiError::InvalidPayload(PayloadError::NotUtf8)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn into_lambda_response_keeps_status_and_headers() {
        let response = ApiResponse::feedback(
            StatusCode::NOT_FOUND,
            crate::api::models::FeedbackResponse::error("resource not found with the ID provided"),
        );

        let lambda_response = into_lambda_response(response);
        assert_eq!(lambda_response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            lambda_response.headers().get("content-type").unwrap(),
            "application/json"
        );
        match lambda_response.body() {
            Body::Text(text) => assert!(text.contains("not found")),
            other => panic!("expected text body, got {other:?}"),
        }
    }
}
